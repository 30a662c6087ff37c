//! Greedy word wrapping and friends.
//!
//! One algorithm serves both paths. The direct-text path measures in
//! characters; the raster path measures rendered width in points.
//!
//! ```text
//! budget 15:  "Organic Whole Wheat Flour"
//!             Organic Whole
//!             Wheat Flour
//! ```

/// Wrap `text` so that `measure(line) <= limit` wherever words allow.
///
/// Words are appended while `measure("current word")` fits, otherwise the
/// line is flushed and the word starts a new one. Words are never split: a
/// word wider than `limit` sits alone on an overflowing line.
pub fn wrap_with<F>(text: &str, limit: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= limit {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap under a character budget.
///
/// ```
/// use labelpress::layout::wrap;
///
/// assert_eq!(
///     wrap("Organic Whole Wheat Flour", 15),
///     vec!["Organic Whole", "Wheat Flour"]
/// );
/// ```
pub fn wrap(text: &str, budget: usize) -> Vec<String> {
    wrap_with(text, budget as f32, |s| s.chars().count() as f32)
}

/// Hard-cut to at most `cap` characters.
///
/// ```
/// use labelpress::layout::truncate;
///
/// assert_eq!(truncate("Extra caramel drizzle", 5), "Extra");
/// assert_eq!(truncate("Oat", 5), "Oat");
/// ```
pub fn truncate(text: &str, cap: usize) -> String {
    text.chars().take(cap).collect()
}

/// Approximate centering on the direct-text path: a fixed left pad.
#[inline]
pub fn center_pad(pad: usize, text: &str) -> String {
    format!("{}{}", " ".repeat(pad), text)
}
