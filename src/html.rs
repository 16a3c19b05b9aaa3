//! Post-processing of model output: cut the `<body>` fragment out of the reply and
//! wrap it in the report's fixed document shell.

use log::{debug, error};

pub const BODY_START: &str = "<body>";
pub const BODY_END: &str = "</body>";

const SHELL_OPEN: &str = "<html><head>";
const HEAD_CLOSE: &str = "</head>";
const SHELL_CLOSE: &str = "</html>";

/// Stylesheet embedded in every report. Kept byte-stable so regenerated reports render
/// identically to previously archived ones.
pub const STYLESHEET: &str = r#"<style>
        body {
            font-family: Arial, sans-serif;
            color: #333;
            line-height: 1.6;
            margin: 0;
            padding: 0;
            background-color: #f4f4f4;
        }
        .container {
            width: 80%;
            margin: auto;
            overflow: hidden;
            background: #fff;
            padding: 20px;
            box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
        }
        header {
            background-color: #4CAF50;
            color: #fff;
            padding: 10px 0;
            text-align: center;
        }
        header img {
            width: 150px;
            margin: 0 auto;
        }
        h1, h2 {
            color: #4CAF50;
        }
        section {
            margin: 20px 0;
        }
        .cta {
            margin: 40px 0;
            padding: 20px;
            background-color: #e7f7e7;
            text-align: center;
            border: 2px solid #4CAF50;
        }
        .cta a {
            color: #fff;
            background-color: #4CAF50;
            padding: 10px 20px;
            text-decoration: none;
            font-weight: bold;
            border-radius: 5px;
        }
        footer {
            text-align: center;
            margin-top: 20px;
            padding: 10px 0;
            background-color: #333;
            color: #fff;
            position: relative;
            bottom: 0;
            width: 100%;
        }
        footer p {
            margin: 0;
        }
        </style>"#;

/// Number of bytes `inject_styles` adds around any fragment.
pub const SHELL_OVERHEAD: usize =
    SHELL_OPEN.len() + STYLESHEET.len() + HEAD_CLOSE.len() + SHELL_CLOSE.len();

/// Returns the span from the first `<body>` through the first `</body>` after it.
///
/// Model output is not guaranteed to follow the requested format, so a reply without both
/// markers is passed through unchanged rather than treated as a failure.
pub fn extract_html(raw: &str) -> String {
    let Some(start) = raw.find(BODY_START) else {
        error!("HTML content not found in the response: missing {}", BODY_START);
        return raw.to_string();
    };

    let Some(end_offset) = raw[start..].find(BODY_END) else {
        error!("HTML content not found in the response: missing {}", BODY_END);
        return raw.to_string();
    };

    let end = start + end_offset + BODY_END.len();
    debug!("Extracted {} of {} bytes of model output", end - start, raw.len());
    raw[start..end].to_string()
}

pub fn inject_styles(fragment: &str) -> String {
    let mut document = String::with_capacity(fragment.len() + SHELL_OVERHEAD);
    document.push_str(SHELL_OPEN);
    document.push_str(STYLESHEET);
    document.push_str(HEAD_CLOSE);
    document.push_str(fragment);
    document.push_str(SHELL_CLOSE);
    document
}
