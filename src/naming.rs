//! Type names from model names, route names, and resource class names.

/// `App\Http\Resources\UserResource` + `Type` → `UserType`;
/// `api.users.index` + `Type` → `UsersIndexType`; `User` + `Resource` → `UserResource`.
pub fn derive_type_name(source: &str, suffix: &str) -> String {
    let base = class_basename(source.trim());
    let base = base.strip_prefix("api.")
        .or_else(|| base.strip_prefix("api/"))
        .unwrap_or(base);
    let base = base.strip_suffix("Resource").unwrap_or(base);

    let mut out = String::with_capacity(base.len() + suffix.len());
    for segment in base.split(['.', '/', '-', '_']).filter(|s| !s.is_empty()) {
        out.push_str(&upper_first(segment));
    }
    out.push_str(suffix);
    out
}

/// Conventional table name: snake case, pluralised (`BlogPost` → `blog_posts`).
pub fn default_table_name(model: &str) -> String {
    pluralize(&snake_case(class_basename(model)))
}

// ------------------------------- Helpers ---------------------------------- //

fn class_basename(name: &str) -> &str {
    let name = name.rsplit('\\').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower { out.push('_'); }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

fn pluralize(word: &str) -> String {
    const SIBILANTS: [&str; 5] = ["s", "x", "z", "ch", "sh"];
    if SIBILANTS.iter().any(|end| word.ends_with(end)) {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) && !stem.is_empty() {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names() {
        assert_eq!(derive_type_name("api.users.index", "Type"), "UsersIndexType");
        assert_eq!(derive_type_name("api/users/show", "Type"), "UsersShowType");
        assert_eq!(derive_type_name("users", "Type"), "UsersType");
        assert_eq!(derive_type_name("admin.blog-posts", "Type"), "AdminBlogPostsType");
    }

    #[test]
    fn resource_classes() {
        assert_eq!(derive_type_name("App\\Http\\Resources\\UserResource", "Type"), "UserType");
        assert_eq!(derive_type_name("resources::PostResource", "Type"), "PostType");
        assert_eq!(derive_type_name("UserResource", ""), "User");
    }

    #[test]
    fn model_names() {
        assert_eq!(derive_type_name("User", "Resource"), "UserResource");
        assert_eq!(derive_type_name("BlogPost", "Resource"), "BlogPostResource");
    }

    #[test]
    fn table_names() {
        assert_eq!(default_table_name("User"), "users");
        assert_eq!(default_table_name("BlogPost"), "blog_posts");
        assert_eq!(default_table_name("Category"), "categories");
        assert_eq!(default_table_name("Address"), "addresses");
        assert_eq!(default_table_name("Day"), "days");
        assert_eq!(default_table_name("App\\Models\\Box"), "boxes");
    }
}
