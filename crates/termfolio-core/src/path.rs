pub const ROOT: &str = "/";

/// Resolves `input` against `current_dir` into a normalized absolute path.
///
/// Empty input yields `current_dir` unchanged. `..` above the root is absorbed.
pub fn resolve(input: &str, current_dir: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return current_dir.to_string();
    }
    if input.starts_with('/') {
        normalize(input)
    } else {
        normalize(&format!("{current_dir}/{input}"))
    }
}

/// Drops empty and `.` segments, applies `..`, and rejoins with one leading `/`.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    format!("/{}", stack.join("/"))
}

/// Parent of a normalized path; the root is its own parent.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

/// Last segment of a normalized path, or `/` for the root.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx + 1 < path.len() => &path[idx + 1..],
        _ => ROOT,
    }
}

pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
