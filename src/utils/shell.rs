/// Quote an argument for display in a copy-pasteable shell command line.
///
/// Arguments made only of characters the shell never interprets are left
/// bare; everything else is wrapped in single quotes.
///
/// # Examples
///
/// ```
/// use bdi_launch::utils::shell::escape;
///
/// assert_eq!(escape("ros2"), "ros2");
/// assert_eq!(escape("__node:=move"), "__node:=move");
/// assert_eq!(escape("planner:='JAVAFF'"), "'planner:='\\''JAVAFF'\\'''");
/// ```
pub fn escape(s: &str) -> String {
    let is_plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if is_plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Join command arguments with shell escaping applied to each.
pub fn join_args(args: &[impl AsRef<str>]) -> String {
    args.iter()
        .map(|arg| escape(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
