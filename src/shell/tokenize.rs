//! Quote-aware line tokenizer.

/// Split a command line into tokens.
///
/// Whitespace outside quotes separates tokens and consecutive runs collapse.
/// Single or double quotes group text (including whitespace) and are stripped;
/// the other quote character inside a quoted span is literal. An unterminated
/// quote runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A token is open once any character or a quote pair has been seen, so `""` yields "".
    let mut open = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                open = true;
            }
            None if ch.is_whitespace() => {
                if open {
                    tokens.push(std::mem::take(&mut current));
                    open = false;
                }
            }
            None => {
                current.push(ch);
                open = true;
            }
        }
    }

    if open {
        tokens.push(current);
    }
    tokens
}
