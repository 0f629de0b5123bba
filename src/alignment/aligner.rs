use crate::types::{CaptionLine, Token};

/// Line index each token falls in, or `None` for a dropped token.
///
/// The line cursor only moves forward, so the sweep is linear in
/// `tokens + lines`. A token is dropped when it ends past the end of the
/// current line, or when every line has already ended. Both inputs must be
/// sorted by `start_sec`; unsorted input mis-drops tokens.
pub fn assign_lines(lines: &[CaptionLine], tokens: &[Token]) -> Vec<Option<usize>> {
    let mut line_idx = 0;
    tokens
        .iter()
        .map(|token| {
            while line_idx < lines.len() && token.start_sec >= lines[line_idx].end_sec {
                line_idx += 1;
            }
            (line_idx < lines.len() && token.end_sec <= lines[line_idx].end_sec)
                .then_some(line_idx)
        })
        .collect()
}

/// Groups time-ordered tokens under time-ordered caption lines, one group per line.
pub fn align_tokens<'t>(lines: &[CaptionLine], tokens: &'t [Token]) -> Vec<Vec<&'t Token>> {
    let mut groups: Vec<Vec<&Token>> = vec![Vec::new(); lines.len()];
    for (token, line) in tokens.iter().zip(assign_lines(lines, tokens)) {
        if let Some(line_idx) = line {
            groups[line_idx].push(token);
        }
    }
    groups
}

/// Tokens that [`align_tokens`] assigned to no line, in input order.
pub fn dropped_tokens<'t>(lines: &[CaptionLine], tokens: &'t [Token]) -> Vec<&'t Token> {
    tokens
        .iter()
        .zip(assign_lines(lines, tokens))
        .filter_map(|(token, line)| line.is_none().then_some(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_ids(group: &[&Token]) -> Vec<u64> {
        group.iter().map(|token| token.word_id).collect()
    }

    #[test]
    fn boundary_spanning_token_is_dropped() {
        let lines = vec![CaptionLine::new(0.0, 2.0), CaptionLine::new(2.0, 4.0)];
        let tokens = vec![
            Token::new(0, "hello", 0.0, 1.0),
            Token::new(1, "big", 1.0, 3.0),
            Token::new(2, "world", 3.0, 3.5),
        ];
        let groups = align_tokens(&lines, &tokens);
        assert_eq!(groups.len(), 2);
        assert_eq!(word_ids(&groups[0]), vec![0]);
        assert_eq!(word_ids(&groups[1]), vec![2]);
        assert_eq!(word_ids(&dropped_tokens(&lines, &tokens)), vec![1]);
    }

    #[test]
    fn token_starting_on_boundary_belongs_to_next_line() {
        let lines = vec![CaptionLine::new(0.0, 2.0), CaptionLine::new(2.0, 4.0)];
        let tokens = vec![
            Token::new(0, "a", 0.0, 1.0),
            Token::new(1, "b", 2.0, 3.0),
            Token::new(2, "c", 3.0, 3.5),
        ];
        assert_eq!(assign_lines(&lines, &tokens), vec![Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn tokens_skip_past_gaps_between_lines() {
        let lines = vec![CaptionLine::new(0.0, 1.0), CaptionLine::new(5.0, 6.0)];
        let tokens = vec![
            Token::new(0, "a", 0.2, 0.8),
            Token::new(1, "b", 5.1, 5.5),
            Token::new(2, "c", 5.5, 6.0),
        ];
        let groups = align_tokens(&lines, &tokens);
        assert_eq!(word_ids(&groups[0]), vec![0]);
        assert_eq!(word_ids(&groups[1]), vec![1, 2]);
    }

    #[test]
    fn tokens_after_last_line_are_dropped() {
        let lines = vec![CaptionLine::new(0.0, 1.0)];
        let tokens = vec![Token::new(0, "late", 1.0, 1.5)];
        let groups = align_tokens(&lines, &tokens);
        assert!(groups[0].is_empty());
        assert_eq!(dropped_tokens(&lines, &tokens).len(), 1);
    }

    #[test]
    fn empty_inputs() {
        let tokens = vec![Token::new(0, "x", 0.0, 1.0)];
        assert!(align_tokens(&[], &tokens).is_empty());
        let groups = align_tokens(&[CaptionLine::new(0.0, 1.0)], &[]);
        assert_eq!(groups, vec![Vec::<&Token>::new()]);
    }

    #[test]
    fn every_token_lands_in_at_most_one_line() {
        let lines = vec![
            CaptionLine::new(0.0, 2.0),
            CaptionLine::new(2.0, 4.0),
            CaptionLine::new(4.5, 6.0),
        ];
        let tokens: Vec<Token> = (0..12)
            .map(|i| {
                let start = i as f64 * 0.5;
                Token::new(i, format!("w{i}"), start, start + 0.7)
            })
            .collect();
        let groups = align_tokens(&lines, &tokens);
        let assigned: usize = groups.iter().map(Vec::len).sum();
        let dropped = dropped_tokens(&lines, &tokens).len();
        assert_eq!(assigned + dropped, tokens.len());
        for (line, group) in lines.iter().zip(&groups) {
            for token in group {
                assert!(token.end_sec <= line.end_sec);
            }
        }
    }
}
