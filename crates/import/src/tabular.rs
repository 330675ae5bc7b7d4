use std::ops::Index;

/// One line of delimited input, split into fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Row(fields)
    }

    /// The field at `index`, or `""` when the row is shorter.
    pub fn get(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extends the row with empty fields up to `width`. Longer rows are left alone.
    pub fn pad_to(&mut self, width: usize) {
        if self.0.len() < width {
            self.0.resize(width, String::new());
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl Index<usize> for Row {
    type Output = str;
    fn index(&self, index: usize) -> &str {
        self.get(index)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

/// Splits a line on `delimiter`, treating text between `quote` characters as
/// opaque. Quote characters toggle the quoted state and are dropped; a doubled
/// quote is not an escape. Always yields at least one field.
pub fn parse_row(line: &str, delimiter: char, quote: char) -> Row {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == quote {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    Row(fields)
}

/// Non-blank lines of `text`, with any trailing carriage return removed.
pub fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}
