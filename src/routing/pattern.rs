//! Route pattern validation.
//!
//! # Responsibilities
//! - Check a pattern is well-formed before it is registered
//! - Extract the `{param}` names it declares
//!
//! # Design Decisions
//! - Pattern syntax is the host router's: literal segments, `{name}`
//!   captures and a trailing `{*rest}` wildcard
//! - Validation happens once at registration, never per request

/// Parameter names declared by `pattern`, in order.
///
/// Returns a description of the first problem found when the pattern is
/// malformed.
pub fn route_params(pattern: &str) -> Result<Vec<&str>, String> {
    if !pattern.starts_with('/') {
        return Err(format!("pattern `{pattern}` must start with '/'"));
    }

    let mut params = Vec::new();
    let segments: Vec<&str> = pattern.split('/').skip(1).collect();
    let last = segments.len().saturating_sub(1);

    for (index, segment) in segments.iter().enumerate() {
        let opens = segment.matches('{').count();
        let closes = segment.matches('}').count();
        if opens == 0 && closes == 0 {
            continue;
        }
        if opens != 1 || closes != 1 || !segment.starts_with('{') || !segment.ends_with('}') {
            return Err(format!(
                "pattern `{pattern}` has a malformed segment `{segment}`; captures must fill the whole segment"
            ));
        }

        let name = &segment[1..segment.len() - 1];
        let bare = name.strip_prefix('*').unwrap_or(name);
        if bare.is_empty() {
            return Err(format!("pattern `{pattern}` has an unnamed capture"));
        }
        if name.starts_with('*') && index != last {
            return Err(format!("pattern `{pattern}` has a wildcard that is not the last segment"));
        }
        if params.iter().any(|existing: &&str| existing.trim_start_matches('*') == bare) {
            return Err(format!("pattern `{pattern}` captures `{bare}` twice"));
        }
        params.push(name);
    }

    Ok(params)
}
