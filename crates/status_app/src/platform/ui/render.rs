use crossterm::style::{style, Color, Stylize};
use status_core::{AppViewModel, LookupNotice, ResultRowView, RowShade, UiState};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

/// Renders one frame: status line, lookup notice, then the result table.
pub fn render(view: &AppViewModel, options: RenderOptions, timestamp: &str) -> String {
    let mut out = String::new();
    out.push_str(&status_line(view, options, timestamp));
    out.push('\n');
    if let Some(notice) = &view.notice {
        out.push_str(&notice_line(notice, options));
        out.push('\n');
    }
    out.push_str(&table(&view.rows, options));
    out
}

fn status_line(view: &AppViewModel, options: RenderOptions, timestamp: &str) -> String {
    let text = match &view.ui_state {
        UiState::Idle => "Ready".to_string(),
        UiState::Loading { operation, .. } => format!("Loading ({operation})... input disabled"),
        UiState::Message(text) => text.clone(),
        UiState::ErrorState(text) if options.color => style(text).red().to_string(),
        UiState::ErrorState(text) => format!("ERROR: {text}"),
    };
    format!("[{timestamp}] {text}")
}

fn notice_line(notice: &LookupNotice, options: RenderOptions) -> String {
    let message = match hex_rgb(&notice.display_colour) {
        Some((r, g, b, _)) if options.color => style(&notice.record.message)
            .with(Color::Rgb { r, g, b })
            .to_string(),
        _ => notice.record.message.clone(),
    };
    format!(
        ">> {}: {} ({})",
        notice.record.mobile_number, message, notice.display_colour
    )
}

fn table(rows: &[ResultRowView], options: RenderOptions) -> String {
    let phone_width = rows
        .iter()
        .map(|row| row.mobile_number.chars().count())
        .chain([HEADER_PHONE.len()])
        .max()
        .unwrap_or(HEADER_PHONE.len());
    let status_width = rows
        .iter()
        .map(|row| row.message.chars().count())
        .chain([HEADER_STATUS.len()])
        .max()
        .unwrap_or(HEADER_STATUS.len());

    let mut out = format!(
        "{:<pw$} | {:<sw$}\n{}-+-{}\n",
        HEADER_PHONE,
        HEADER_STATUS,
        "-".repeat(phone_width),
        "-".repeat(status_width),
        pw = phone_width,
        sw = status_width,
    );

    for row in rows {
        let phone = format!("{:<phone_width$}", row.mobile_number);
        let status = format!("{:<status_width$}", row.message);
        if options.color {
            let (r, g, b) = match row.shade {
                RowShade::Even => EVEN_ROW_RGB,
                RowShade::Odd => ODD_ROW_RGB,
            };
            let phone = style(phone).black().on(Color::Rgb { r, g, b });
            let status = match tint_rgb(&row.tint) {
                Some(background) => style(status).black().on(background).to_string(),
                None => status,
            };
            out.push_str(&format!("{phone} | {status}\n"));
        } else {
            out.push_str(&format!("{phone} | {status}\n"));
        }
    }
    out
}

/// Flattens an `#RRGGBBAA` tint onto a white background.
fn tint_rgb(tint: &str) -> Option<Color> {
    let (r, g, b, alpha) = hex_rgb(tint)?;
    let alpha = u32::from(alpha.unwrap_or(0xFF));
    let blend = |c: u8| ((u32::from(c) * alpha + 0xFF * (0xFF - alpha)) / 0xFF) as u8;
    Some(Color::Rgb {
        r: blend(r),
        g: blend(g),
        b: blend(b),
    })
}

/// Parses `#RRGGBB` or `#RRGGBBAA`.
fn hex_rgb(colour: &str) -> Option<(u8, u8, u8, Option<u8>)> {
    let hex = colour.trim().strip_prefix('#')?;
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { Some(byte(6)?) } else { None };
    Some((byte(0)?, byte(2)?, byte(4)?, alpha))
}
