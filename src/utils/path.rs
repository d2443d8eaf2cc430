use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

pub const PACKAGE_URI_SCHEME: &str = "package://";

/// Expand tilde (~) in paths to actual home directories.
///
/// Supports:
/// - `~` or `~/path` - expands to current user's home directory
/// - `~username/path` - expands to the specified user's home directory
///
/// # Examples
///
/// ```
/// use bdi_launch::utils::path::expand_tilde;
///
/// let path = expand_tilde("/opt/ros/share").unwrap();
/// assert_eq!(path, std::path::PathBuf::from("/opt/ros/share"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        let home = std::env::var("HOME").ok()?;
        return Some(PathBuf::from(home).join(after_tilde.trim_start_matches('/')));
    }

    let username_end = after_tilde.find('/').unwrap_or(after_tilde.len());
    let username = &after_tilde[..username_end];
    let rest = after_tilde[username_end..].trim_start_matches('/');

    let user = uzers::get_user_by_name(username)?;
    Some(user.home_dir().join(rest))
}

/// Split `package://<package>/<relative path>` into its two parts.
///
/// ```
/// use bdi_launch::utils::path::parse_package_uri;
///
/// assert_eq!(
///     parse_package_uri("package://ros2_bdi_on_webots/pddl/gripper-domain.pddl"),
///     Some(("ros2_bdi_on_webots", "pddl/gripper-domain.pddl"))
/// );
/// assert_eq!(parse_package_uri("/abs/domain.pddl"), None);
/// ```
pub fn parse_package_uri(value: &str) -> Option<(&str, &str)> {
    let rest = value.strip_prefix(PACKAGE_URI_SCHEME)?;
    let (package, relative) = rest.split_once('/').unwrap_or((rest, ""));
    if package.is_empty() {
        return None;
    }
    Some((package, relative.trim_start_matches('/')))
}

/// Install prefixes listed in a colon separated search path such as `AMENT_PREFIX_PATH`.
pub fn split_prefixes(search_path: &str) -> Vec<PathBuf> {
    std::env::split_paths(search_path)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
