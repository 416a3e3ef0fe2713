/// 接受值的旗標
const VALUE_FLAGS: &[&str] = &["--region", "--config"];
const SWITCH_FLAGS: &[&str] = &["--json", "--verbose", "-v", "--help", "-h", "--version", "-V"];

/// Splits raw arguments into what the CLI understands and what it ignores.
///
/// Unknown flags and every positional after the first are dropped instead of
/// rejected. `--region` takes the next token verbatim; a value flag at the
/// end of the line has nothing to take and is dropped, leaving its default.
pub fn filter_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut kept: Vec<String> = args.next().into_iter().collect();
    let mut ignored = Vec::new();
    let mut seen_positional = false;

    while let Some(arg) = args.next() {
        let flag_name = arg.split('=').next().unwrap_or(&arg);

        if VALUE_FLAGS.contains(&flag_name) {
            if arg.contains('=') {
                kept.push(arg);
            } else if let Some(value) = args.next() {
                kept.push(arg);
                kept.push(value);
            } else {
                ignored.push(arg);
            }
        } else if SWITCH_FLAGS.contains(&arg.as_str()) {
            kept.push(arg);
        } else if is_flag(&arg) {
            ignored.push(arg);
        } else if !seen_positional {
            seen_positional = true;
            kept.push(arg);
        } else {
            ignored.push(arg);
        }
    }

    (kept, ignored)
}

// "-5551234" 之類的數字不算旗標
fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.len() > 1 && !arg[1..].starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_arguments_pass_through() {
        let (kept, ignored) = filter_args(args(&[
            "numintel",
            "+14155552671",
            "--region",
            "US",
            "--json",
            "--config=numintel.toml",
            "-v",
        ]));
        assert_eq!(
            kept,
            args(&[
                "numintel",
                "+14155552671",
                "--region",
                "US",
                "--json",
                "--config=numintel.toml",
                "-v"
            ])
        );
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_unknown_flags_and_extra_positionals_are_ignored() {
        let (kept, ignored) = filter_args(args(&[
            "numintel",
            "--fast",
            "+14155552671",
            "extra",
            "--region",
            "gb",
        ]));
        assert_eq!(kept, args(&["numintel", "+14155552671", "--region", "gb"]));
        assert_eq!(ignored, args(&["--fast", "extra"]));
    }

    #[test]
    fn test_region_value_is_taken_verbatim() {
        let (kept, _) = filter_args(args(&["numintel", "555", "--region", "--json"]));
        assert_eq!(kept, args(&["numintel", "555", "--region", "--json"]));
    }

    #[test]
    fn test_trailing_value_flag_is_ignored() {
        let (kept, ignored) = filter_args(args(&["numintel", "+14155552671", "--region"]));
        assert_eq!(kept, args(&["numintel", "+14155552671"]));
        assert_eq!(ignored, args(&["--region"]));
    }

    #[test]
    fn test_missing_positional_stays_missing() {
        let (kept, ignored) = filter_args(args(&["numintel", "--json", "--bogus"]));
        assert_eq!(kept, args(&["numintel", "--json"]));
        assert_eq!(ignored, args(&["--bogus"]));
    }
}
