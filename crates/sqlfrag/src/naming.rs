//! Property name → column name mapping.

/// Convert a camelCase property name into a lower_snake_case column name.
///
/// An underscore goes in front of each uppercase letter that starts a new
/// word. Runs of capitals stay together (`userID` → `user_id`), an existing
/// underscore is never doubled, and a single leading underscore is dropped.
///
/// ```
/// use sqlfrag::naming::to_column_name;
///
/// assert_eq!(to_column_name("userName"), "user_name");
/// assert_eq!(to_column_name("createTime"), "create_time");
/// assert_eq!(to_column_name("user_name"), "user_name");
/// ```
pub fn to_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + name.len() / 2);
    let mut prev_upper = false;

    for (i, c) in name.chars().enumerate() {
        if i == 0 && c == '_' {
            continue;
        }
        if c.is_uppercase() {
            if !prev_upper && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_upper = true;
        } else {
            out.push(c);
            prev_upper = false;
        }
    }

    out
}
