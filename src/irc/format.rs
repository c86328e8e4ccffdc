//! mIRC formatting codes for outbound text.

/// Starts a colour sequence: `\x03` followed by a two-digit colour index.
pub const COLOR: char = '\x03';

/// Clears all colours and styles.
pub const RESET: char = '\x0f';

/// Colour indices that stay readable on both light and dark backgrounds.
pub const NICK_COLORS: [u8; 11] = [2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13];

/// Pick a stable colour for a numeric account id. Non-numeric ids map to
/// the first colour.
pub fn nick_color(account_id: &str) -> u8 {
    let id: u64 = account_id.parse().unwrap_or(0);
    NICK_COLORS[(id % NICK_COLORS.len() as u64) as usize]
}

/// `text` wrapped in a colour sequence and a reset.
pub fn colored(text: &str, color: u8) -> String {
    format!("{}{:02}{}{}", COLOR, color, text, RESET)
}

/// Remove colour, bold, italic, underline, reverse and reset codes.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x02' | '\x1d' | '\x1f' | '\x16' | '\x0f' => {}
            '\x03' => {
                for _ in 0..2 {
                    if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                        chars.next();
                    }
                }
                let mut lookahead = chars.clone();
                if lookahead.next() == Some(',') && lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                    chars.next();
                    for _ in 0..2 {
                        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                            chars.next();
                        }
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
