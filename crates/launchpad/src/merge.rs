use serde_json::Value;

/// The depth a document merge applies overrides at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
	/// Top-level keys of the override replace base values wholesale.
	Shallow,

	/// Objects are merged recursively; all other values are replaced.
	Deep,
}

/// Merges an override document into a base document in place.
///
/// When both documents are objects, the override's keys are applied to the
/// base at the given depth. Otherwise the base is replaced by the override.
///
/// # Arguments
///
/// * `base` - The document merged into.
/// * `overrides` - The document merged from. Override wins on key collision.
/// * `depth` - The merge depth.
pub fn merge(base: &mut Value, overrides: Value, depth: Depth) {
	match (base, overrides) {
		(Value::Object(base), Value::Object(overrides)) => {
			for (key, value) in overrides {
				match depth {
					Depth::Shallow => {
						base.insert(key, value);
					}
					Depth::Deep => match base.get_mut(&key) {
						Some(slot) => merge(slot, value, depth),
						None => {
							base.insert(key, value);
						}
					},
				}
			}
		}
		(base, overrides) => *base = overrides,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn shallow() {
		let mut base = json!({
			"services": { "LaunchPage": {}, "NavTargetResolution": {} },
			"applications": {}
		});

		merge(
			&mut base,
			json!({ "services": { "Extra": {} }, "custom": true }),
			Depth::Shallow,
		);

		// The colliding key is replaced wholesale, not merged into.
		assert_eq!(
			base,
			json!({
				"services": { "Extra": {} },
				"applications": {},
				"custom": true
			})
		);
	}

	#[test]
	fn deep() {
		let mut base = json!({
			"services": { "LaunchPage": {}, "NavTargetResolution": {} }
		});

		merge(
			&mut base,
			json!({ "services": { "Extra": {} }, "custom": true }),
			Depth::Deep,
		);

		assert_eq!(
			base,
			json!({
				"services": { "LaunchPage": {}, "NavTargetResolution": {}, "Extra": {} },
				"custom": true
			})
		);
	}

	#[test]
	fn replaces_non_objects() {
		let mut base = json!({ "theme": "sap_fiori_3" });

		merge(&mut base, json!({ "theme": ["a", "b"] }), Depth::Deep);

		assert_eq!(base, json!({ "theme": ["a", "b"] }));
	}
}
