use crate::extraction::PositionedWord;

/// Vertical distance under which two words are considered on the same line.
pub const DEFAULT_LINE_TOLERANCE: f64 = 3.0;

/// Words sharing a Y band, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Bucket key: the rounded top of the word that opened the line.
    pub y: f64,
    pub words: Vec<PositionedWord>,
}

impl TextLine {
    /// Raw line text, every word kept regardless of column.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Group positioned words into lines, top to bottom.
///
/// Single greedy pass in word order: each word's top is rounded, then the first
/// existing line whose key is within `tolerance` takes it. Line keys are never
/// recentred, so the result depends only on the input order.
pub fn reconstruct_lines(words: &[PositionedWord], tolerance: f64) -> Vec<TextLine> {
    let mut buckets: Vec<TextLine> = Vec::new();

    for word in words {
        let y_key = word.y.round_ties_even();

        match buckets
            .iter_mut()
            .find(|line| (line.y - y_key).abs() <= tolerance)
        {
            Some(line) => line.words.push(word.clone()),
            None => buckets.push(TextLine {
                y: y_key,
                words: vec![word.clone()],
            }),
        }
    }

    buckets.sort_by(|a, b| a.y.total_cmp(&b.y));
    for line in &mut buckets {
        line.words.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    buckets
}
