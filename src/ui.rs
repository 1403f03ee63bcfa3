//! Rendering helpers shared by the terminal front-end

use ratatui::{prelude::*, widgets::*};

use crate::messages::Status;
use crate::models::{HistoryEntry, HttpMethod};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Bordered block, highlighted when focused
pub fn panel_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Cursor cell after the last character of a bordered text area,
/// clamped to the inside of the border
pub fn cursor_position(area: Rect, text: &str) -> (u16, u16) {
    let line_count = u16::try_from(text.split('\n').count().max(1)).unwrap_or(u16::MAX);
    let last_len = text
        .rsplit('\n')
        .next()
        .map(|line| u16::try_from(line.chars().count()).unwrap_or(u16::MAX))
        .unwrap_or(0);

    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let max_y = area.y.saturating_add(area.height.saturating_sub(2));
    let x = area.x.saturating_add(1).saturating_add(last_len).min(max_x);
    let y = area.y.saturating_add(line_count).min(max_y);
    (x, y)
}

/// Status bar text
pub fn status_line(status: &Status) -> String {
    match status {
        Status::Idle => "Status: — | Time: —".to_string(),
        Status::Sending => "Sending...".to_string(),
        Status::Completed { status, elapsed_ms } => {
            format!("Status: {} | Time: {:.1} ms", status, elapsed_ms)
        }
        Status::Failed => "Request Failed".to_string(),
        Status::Rejected(message) => format!("Error: {}", message),
        Status::Saved(path) => format!("Request saved to {}", path.display()),
        Status::Error(message) => message.clone(),
    }
}

/// One history list line: `[HH:MM:SS] GET → url`
pub fn history_label(entry: &HistoryEntry) -> String {
    format!(
        "[{}] {} → {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.method,
        entry.original_url
    )
}

pub fn environment_label(name: &str) -> String {
    if name.is_empty() {
        "Environment: (none)".to_string()
    } else {
        format!("Environment: {}", name)
    }
}

/// Simple JSON syntax highlighting for pretty-printed text
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;

    let flush = |current: &mut String, spans: &mut Vec<Span<'static>>| {
        if current.is_empty() {
            return;
        }
        let word = std::mem::take(current);
        let trimmed = word.trim();
        let style = if matches!(trimmed, "true" | "false" | "null") {
            Style::default().fg(Color::Magenta)
        } else if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        spans.push(Span::styled(word, style));
    };

    for (i, c) in line.char_indices() {
        if in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                // A key is a string followed by a colon
                let is_key = line[i + 1..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(std::mem::take(&mut current), Style::default().fg(color)));
            }
            continue;
        }

        match c {
            '"' => {
                flush(&mut current, &mut spans);
                in_string = true;
                current.push(c);
            }
            '{' | '}' | '[' | ']' | ':' | ',' => {
                flush(&mut current, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::White)));
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut spans);

    Line::from(spans)
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_status_line_one_decimal() {
        let status = Status::Completed { status: 404, elapsed_ms: 12.345 };
        assert_eq!(status_line(&status), "Status: 404 | Time: 12.3 ms");
        assert_eq!(status_line(&Status::Failed), "Request Failed");
    }

    #[test]
    fn test_cursor_after_last_char() {
        let area = Rect::new(2, 3, 20, 6);
        assert_eq!(cursor_position(area, ""), (3, 4));
        assert_eq!(cursor_position(area, "ab\ncd"), (5, 5));
    }

    #[test]
    fn test_cursor_clamped_for_huge_input() {
        let area = Rect::new(10, 0, 40, 5);
        let long_line = "x".repeat(70_000);
        assert_eq!(cursor_position(area, &long_line), (48, 1));

        let many_lines = "\n".repeat(70_000);
        assert_eq!(cursor_position(area, &many_lines), (11, 3));
    }

    #[test]
    fn test_history_label() {
        let entry = HistoryEntry {
            method: HttpMethod::PATCH,
            original_url: "{{base_url}}/posts/1".into(),
            timestamp: Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        assert_eq!(history_label(&entry), "[03:04:05] PATCH → {{base_url}}/posts/1");
    }

    #[test]
    fn test_highlight_keeps_text() {
        let text = "{\n    \"a\": \"x:y\",\n    \"b\": [1, true, null]\n}";
        let rendered: Vec<String> = highlight_json(text)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(rendered.join("\n"), text);
    }
}
