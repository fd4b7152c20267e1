use anyhow::Result;
use dialoguer::Input;

/// Validate a menu or keep-index entry: an integer in `1..=max`.
///
/// Pure so the re-prompt loops stay trivial and this stays testable without
/// a terminal.
pub fn parse_choice(input: &str, max: usize) -> Result<usize> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{input:?} is not a valid response."))?;
    if choice < 1 || choice > max {
        anyhow::bail!("{input:?} is not a valid response.");
    }
    Ok(choice)
}

/// Prompt until the user enters an integer in `1..=max`. Invalid input is
/// reported and re-prompted, never accepted.
pub fn prompt_choice(prompt: &str, max: usize) -> Result<usize> {
    loop {
        let raw: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_choice(&raw, max) {
            Ok(choice) => return Ok(choice),
            Err(err) => println!("{err} Please try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_valid_range() {
        assert_eq!(parse_choice("1", 3).unwrap(), 1);
        assert_eq!(parse_choice("3", 3).unwrap(), 3);
        assert_eq!(parse_choice("  2 ", 3).unwrap(), 2);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse_choice("0", 3).is_err());
        assert!(parse_choice("4", 3).is_err());
        assert!(parse_choice("-1", 3).is_err());
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(parse_choice("", 3).is_err());
        assert!(parse_choice("two", 3).is_err());
        assert!(parse_choice("1.5", 3).is_err());
    }
}
