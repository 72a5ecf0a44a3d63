//! Naming helpers for deriving admin aliases, table names and labels.
//!
//! The default alias of a model is `to_snake_case(pluralize(short_name(path)))`,
//! so `app::models::BlogPost` is served under `blog_posts`.

/// Words that have the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
	"audio",
	"data",
	"deer",
	"equipment",
	"feedback",
	"fish",
	"information",
	"media",
	"metadata",
	"money",
	"news",
	"rice",
	"series",
	"sheep",
	"software",
	"species",
	"staff",
];

/// Irregular singular to plural forms.
const IRREGULAR: &[(&str, &str)] = &[
	("analysis", "analyses"),
	("child", "children"),
	("criterion", "criteria"),
	("foot", "feet"),
	("goose", "geese"),
	("half", "halves"),
	("knife", "knives"),
	("leaf", "leaves"),
	("life", "lives"),
	("man", "men"),
	("mouse", "mice"),
	("ox", "oxen"),
	("person", "people"),
	("quiz", "quizzes"),
	("tooth", "teeth"),
	("wife", "wives"),
	("woman", "women"),
];

/// Return the last path segment of a type path, without generic arguments.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::naming::short_name;
///
/// assert_eq!(short_name("app::models::BlogPost"), "BlogPost");
/// assert_eq!(short_name("app::Page<app::Draft>"), "Page");
/// assert_eq!(short_name("User"), "User");
/// ```
pub fn short_name(path: &str) -> &str {
	let base = path.split('<').next().unwrap_or(path);
	base.rsplit("::").next().unwrap_or(base)
}

/// Pluralize the last word of an English (optionally CamelCase) identifier.
///
/// Leading words and the casing of the last word are preserved.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::naming::pluralize;
///
/// assert_eq!(pluralize("BlogPost"), "BlogPosts");
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("Person"), "People");
/// assert_eq!(pluralize("Address"), "Addresses");
/// assert_eq!(pluralize("News"), "News");
/// ```
pub fn pluralize(word: &str) -> String {
	if word.is_empty() {
		return String::new();
	}

	let start = last_word_start(word);
	let (prefix, last) = word.split_at(start);
	let singular = last.to_ascii_lowercase();
	let plural = plural_of(&singular);

	// Keep the caller's casing for the shared stem, append the rest lowercase.
	let shared = singular
		.bytes()
		.zip(plural.bytes())
		.take_while(|(a, b)| a == b)
		.count();

	let mut result = String::with_capacity(word.len() + 3);
	result.push_str(prefix);
	result.push_str(&last[..shared]);
	result.push_str(&plural[shared..]);
	result
}

fn plural_of(singular: &str) -> String {
	if UNCOUNTABLE.contains(&singular) {
		return singular.to_string();
	}
	if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == singular) {
		return (*plural).to_string();
	}

	let bytes = singular.as_bytes();
	if let Some(stem) = singular.strip_suffix('y')
		&& bytes.len() > 1
		&& !is_vowel(bytes[bytes.len() - 2])
	{
		return format!("{stem}ies");
	}
	if ["s", "x", "z", "ch", "sh"]
		.iter()
		.any(|suffix| singular.ends_with(suffix))
	{
		return format!("{singular}es");
	}
	format!("{singular}s")
}

fn is_vowel(b: u8) -> bool {
	matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Byte index where the last CamelCase word of `word` begins.
fn last_word_start(word: &str) -> usize {
	let chars: Vec<(usize, char)> = word.char_indices().collect();
	let mut start = 0;
	for (pos, &(idx, ch)) in chars.iter().enumerate() {
		if ch == '_' || ch == '-' || ch == ' ' {
			start = idx + ch.len_utf8();
			continue;
		}
		if pos == 0 || !ch.is_ascii_uppercase() {
			continue;
		}
		let prev = chars[pos - 1].1;
		let next_is_lower = chars
			.get(pos + 1)
			.is_some_and(|&(_, next)| next.is_ascii_lowercase());
		if prev.is_ascii_lowercase() || prev.is_ascii_digit() || next_is_lower {
			start = idx;
		}
	}
	start
}

/// Convert a string to snake_case.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("BlogPosts"), "blog_posts");
/// assert_eq!(to_snake_case("HTTPRequests"), "http_requests");
/// assert_eq!(to_snake_case("user_profiles"), "user_profiles");
/// ```
pub fn to_snake_case(s: &str) -> String {
	let mut result = String::with_capacity(s.len() + 4);
	let mut prev_was_upper = false;
	let mut prev_was_separator = true;

	for ch in s.chars() {
		if ch == '_' || ch == '-' || ch == ' ' {
			if !prev_was_separator {
				result.push('_');
			}
			prev_was_separator = true;
			prev_was_upper = false;
		} else if ch.is_ascii_uppercase() {
			if !prev_was_separator && !prev_was_upper {
				result.push('_');
			}
			result.push(ch.to_ascii_lowercase());
			prev_was_upper = true;
			prev_was_separator = false;
		} else {
			// "HTTPRequest": the 'R' before 'e' starts a new word
			if prev_was_upper
				&& result.len() > 1
				&& let Some(last) = result.pop()
			{
				if !result.ends_with('_') {
					result.push('_');
				}
				result.push(last);
			}
			result.push(ch.to_ascii_lowercase());
			prev_was_upper = false;
			prev_was_separator = false;
		}
	}

	result
}

/// Turn a field name into a display label.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::naming::humanize;
///
/// assert_eq!(humanize("created_at"), "Created at");
/// assert_eq!(humanize("firstName"), "First name");
/// ```
pub fn humanize(name: &str) -> String {
	let snake = to_snake_case(name);
	let spaced = snake.trim_matches('_').replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Default admin alias for a model type path.
///
/// # Examples
///
/// ```
/// use reinhardt_model_admin::naming::alias_for;
///
/// assert_eq!(alias_for("app::models::BlogPost"), "blog_posts");
/// assert_eq!(alias_for("Category"), "categories");
/// ```
pub fn alias_for(path: &str) -> String {
	to_snake_case(&pluralize(short_name(path)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("User", "Users")]
	#[case("Category", "Categories")]
	#[case("Day", "Days")]
	#[case("Box", "Boxes")]
	#[case("Match", "Matches")]
	#[case("Status", "Statuses")]
	#[case("Person", "People")]
	#[case("Child", "Children")]
	#[case("Equipment", "Equipment")]
	#[case("BlogPost", "BlogPosts")]
	#[case("UserCategory", "UserCategories")]
	#[case("SalesPerson", "SalesPeople")]
	#[case("URL", "URLs")]
	fn test_pluralize(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(pluralize(input), expected);
	}

	#[rstest]
	#[case("UserProfiles", "user_profiles")]
	#[case("Users", "users")]
	#[case("user_profiles", "user_profiles")]
	#[case("HTTPRequest", "http_request")]
	#[case("MyTableName", "my_table_name")]
	#[case("", "")]
	fn test_to_snake_case(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(to_snake_case(input), expected);
	}

	#[rstest]
	#[case("app::models::BlogPost", "blog_posts")]
	#[case("crate::Person", "people")]
	#[case("Page<Draft>", "pages")]
	#[case("NewsItem", "news_items")]
	fn test_alias_for(#[case] path: &str, #[case] expected: &str) {
		assert_eq!(alias_for(path), expected);
	}

	#[rstest]
	fn test_alias_is_never_empty_for_named_types() {
		assert!(!alias_for("a::B").is_empty());
	}

	#[rstest]
	#[case("title", "Title")]
	#[case("created_at", "Created at")]
	#[case("isActive", "Is active")]
	#[case("", "")]
	fn test_humanize(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(humanize(input), expected);
	}
}
