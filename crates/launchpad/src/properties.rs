use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

fn re_properties_ext() -> &'static regex::Regex {
	static RE_PROPERTIES_EXT: OnceLock<regex::Regex> = OnceLock::new();

	RE_PROPERTIES_EXT.get_or_init(|| regex::Regex::new(r"(\.properties)$").unwrap())
}

/// A localization bundle error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A bundle does not exist.
	#[error("Localization bundle not found at {0}")]
	NotFound(PathBuf),

	/// A bundle ends with an unfinished escape or continuation.
	#[error("Localization bundle ends with an unfinished escape")]
	TrailingEscape,

	/// A bundle contains an invalid unicode escape.
	#[error("Invalid unicode escape \\u{0}")]
	InvalidUnicodeEscape(String),

	/// An IO error occurred.
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// A localization bundle result.
pub type Result<T> = std::result::Result<T, Error>;

/// Rewrites a bundle path for a locale by inserting `_<locale>` before the
/// trailing `.properties` extension.
/// Paths without the extension are returned unchanged.
///
/// # Arguments
///
/// * `path` - The bundle path.
/// * `locale` - The locale suffix.
#[must_use]
pub fn localized_path(path: &str, locale: &str) -> String {
	re_properties_ext()
		.replace(path, format!("_{locale}${{1}}"))
		.into_owned()
}

/// A flat mapping from key to localized string, parsed from a
/// properties-style file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Bundle {
	entries: HashMap<String, String>,
}

impl Bundle {
	/// Parses a bundle from properties-style text.
	///
	/// Blank lines and lines starting with `#` or `!` are skipped. Keys are
	/// separated from values by the first unescaped `=` or `:`, with
	/// surrounding whitespace trimmed; a line without a separator is a key
	/// with an empty value. A line ending with a backslash continues on the
	/// next line, whose leading whitespace is stripped.
	///
	/// # Arguments
	///
	/// * `text` - The text to parse.
	///
	/// # Errors
	///
	/// If the text ends with an unfinished escape or continuation,
	/// [`Error::TrailingEscape`] is returned.
	///
	/// If the text contains an invalid `\u` escape,
	/// [`Error::InvalidUnicodeEscape`] is returned.
	pub fn parse(text: &str) -> Result<Self> {
		let mut entries = HashMap::new();
		let mut lines = text.lines();

		while let Some(line) = lines.next() {
			let line = line.trim_start();

			if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
				continue;
			}

			// Join continuation lines into one logical line.
			let mut logical = line.to_owned();

			while has_open_continuation(&logical) {
				logical.pop();

				match lines.next() {
					Some(next) => logical.push_str(next.trim_start()),
					None => return Err(Error::TrailingEscape),
				}
			}

			let (key, value) = split_entry(&logical)?;

			entries.insert(key, value);
		}

		Ok(Self { entries })
	}

	/// Parses and returns a bundle from a file.
	///
	/// # Arguments
	///
	/// * `path` - The path to the bundle file.
	///
	/// # Errors
	///
	/// If the bundle file does not exist, [`Error::NotFound`] is returned.
	///
	/// Errors from [`parse`] are returned verbatim.
	///
	/// [`parse`]: Bundle::parse
	pub fn from_file<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();

		let text = fs::read_to_string(path).map_err(|err| match err.kind() {
			io::ErrorKind::NotFound => Error::NotFound(path.to_owned()),
			_ => err.into(),
		})?;

		Self::parse(&text)
	}

	/// Returns the localized string for a key.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Resolves a raw text against the bundle.
	///
	/// One pair of `{{...}}` markers is stripped to obtain the lookup key.
	/// If the key exists in the bundle, the localized string is returned;
	/// otherwise the stripped value itself is.
	///
	/// # Arguments
	///
	/// * `raw` - The raw text, possibly wrapped in `{{...}}` markers.
	#[must_use]
	pub fn resolve(&self, raw: &str) -> String {
		let key = raw.replacen("{{", "", 1).replacen("}}", "", 1);

		match self.entries.get(&key) {
			Some(localized) => localized.clone(),
			None => key,
		}
	}
}

/// Checks if a logical line ends with an unescaped continuation backslash.
fn has_open_continuation(line: &str) -> bool {
	line.chars().rev().take_while(|&ch| ch == '\\').count() % 2 == 1
}

/// Splits a logical line into an unescaped key and value.
fn split_entry(line: &str) -> Result<(String, String)> {
	let mut escaped = false;

	for (index, ch) in line.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}

		match ch {
			'\\' => escaped = true,
			'=' | ':' => {
				let key = unescape(line[..index].trim_end())?;
				let value = unescape(line[index + ch.len_utf8()..].trim_start())?;

				return Ok((key, value));
			}
			_ => {}
		}
	}

	Ok((unescape(line.trim_end())?, String::new()))
}

/// Processes backslash escapes in a key or value.
fn unescape(text: &str) -> Result<String> {
	let mut out = String::with_capacity(text.len());
	let mut chars = text.chars();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			out.push(ch);
			continue;
		}

		match chars.next() {
			Some('n') => out.push('\n'),
			Some('t') => out.push('\t'),
			Some('r') => out.push('\r'),
			Some('u') => {
				let digits: String = (&mut chars).take(4).collect();

				let code = (digits.len() == 4)
					.then(|| u32::from_str_radix(&digits, 16).ok())
					.flatten()
					.and_then(char::from_u32)
					.ok_or(Error::InvalidUnicodeEscape(digits))?;

				out.push(code);
			}
			// Escaped separators, comment markers, spaces, and backslashes
			// are passed through literally.
			Some(other) => out.push(other),
			None => return Err(Error::TrailingEscape),
		}
	}

	Ok(out)
}
