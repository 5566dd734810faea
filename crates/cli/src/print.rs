//! Plain terminal output for the one-shot commands.

use colored::{ColoredString, Colorize};
use recommender_view::theme::{BRAND_COLOR, ERROR_COLOR};
use recommender_view::{BodyView, ResultContent, ResultView, Rgb, ViewModel};

fn tint(text: &str, color: Rgb) -> ColoredString {
    text.truecolor(color.0, color.1, color.2)
}

/// Lines for everything below the form.
pub fn body_lines(view: &ViewModel) -> Vec<String> {
    match &view.body {
        BodyView::Blank => Vec::new(),
        BodyView::Loading { caption } => vec![caption.dimmed().to_string()],
        BodyView::Error { message } => {
            vec![tint(message, ERROR_COLOR).to_string()]
        }
        BodyView::Result(result) => result_lines(result),
    }
}

fn result_lines(result: &ResultView) -> Vec<String> {
    let badge = &result.badge;
    let mut lines = vec![
        tint(&badge.heading(), badge.accent).bold().to_string(),
        format!("{} {}", "artwork:".dimmed(), badge.image_url.dimmed()),
        String::new(),
    ];

    match &result.content {
        ResultContent::NoRecommendations { message } => {
            lines.push(tint(message, ERROR_COLOR).bold().to_string());
        }
        ResultContent::Songs(rows) => {
            for row in rows {
                lines.push(format!("{} {}", "♪".green(), row.heading().bold()));
                let artist = match &row.language {
                    Some(language) => format!("{} ({})", row.artist, language),
                    None => row.artist.clone(),
                };
                lines.push(format!("   {}", artist.dimmed()));
            }
        }
    }
    lines
}

pub fn print_view(view: &ViewModel) {
    println!("{}", tint(view.header.title, BRAND_COLOR).bold());
    for line in body_lines(view) {
        println!("{line}");
    }
}
