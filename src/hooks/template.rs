//! Placeholder expansion for hook commands

use super::HookContext;

const OPEN: &str = "{{.";
const CLOSE: &str = "}}";

/// Wrap `s` in single quotes for `sh`.
///
/// Embedded single quotes become `'\''` (close, escaped quote, reopen), so
/// the result is always exactly one shell word with no expansion inside.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Replace `{{.Path}}`, `{{.Branch}}`, `{{.ProjectRoot}}` and
/// `{{.DefaultBranch}}` with shell-quoted context values.
///
/// A single left-to-right pass over `command`: substituted values are never
/// scanned again, so placeholder text inside a value stays literal. Unknown
/// placeholders are kept as written.
pub fn expand_templates(command: &str, ctx: &HookContext) -> String {
    let mut out = String::with_capacity(command.len());
    let mut rest = command;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let value = tail[OPEN.len()..]
            .find(CLOSE)
            .and_then(|end| {
                let name = &tail[OPEN.len()..OPEN.len() + end];
                placeholder_value(name, ctx).map(|v| (v, OPEN.len() + end + CLOSE.len()))
            });

        match value {
            Some((value, consumed)) => {
                out.push_str(&shell_quote(&value));
                rest = &tail[consumed..];
            }
            None => {
                out.push_str(OPEN);
                rest = &tail[OPEN.len()..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn placeholder_value(name: &str, ctx: &HookContext) -> Option<String> {
    match name {
        "Path" => Some(ctx.path.to_string_lossy().into_owned()),
        "Branch" => Some(ctx.branch.clone()),
        "ProjectRoot" => Some(ctx.project_root.to_string_lossy().into_owned()),
        "DefaultBranch" => Some(ctx.default_branch.clone()),
        _ => None,
    }
}
