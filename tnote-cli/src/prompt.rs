use std::io::{self, BufRead, Write};

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm<R, W>(question: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = io::Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let yes = confirm("Create 20240101.md?", &mut input, &mut output).unwrap();
        (yes, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_confirm_answers() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("").0);
        assert!(!ask("yep\n").0);
    }

    #[test]
    fn test_confirm_prompt_text() {
        assert_eq!(ask("y\n").1, "Create 20240101.md? [y/N]: ");
    }
}
