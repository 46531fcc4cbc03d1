//! Gallery rendering: a standalone HTML page embedding the extracted videos.
//!
//! Pure formatting; the caller decides where the page is written.

const GALLERY_HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Extracted Videos</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f4f4f9;
            margin: 0;
            padding: 20px;
        }
        h1 {
            text-align: center;
            color: #333;
        }
        .gallery {
            display: flex;
            flex-wrap: wrap;
            gap: 15px;
            justify-content: center;
        }
        .gallery video {
            max-width: 300px;
            max-height: 200px;
            border: 1px solid #ddd;
            border-radius: 5px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
        }
    </style>
</head>
<body>
    <h1>Extracted Videos</h1>
    <div class="gallery">
"#;

const GALLERY_FOOTER: &str = r#"    </div>
</body>
</html>
"#;

/// Renders the extracted video links into a standalone gallery page.
#[must_use]
pub fn render_gallery(video_links: &[String]) -> String {
    let mut page = String::from(GALLERY_HEADER);
    for link in video_links {
        let src = link.replace('"', "&quot;");
        page.push_str(&format!(
            "        <video controls><source src=\"{src}\" type=\"video/mp4\"></video>\n"
        ));
    }
    page.push_str(GALLERY_FOOTER);
    page
}
