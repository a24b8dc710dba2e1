use crate::json::json_struct_nodefault;

/// The name of the launchpad link.
const LINK_NAME: &str = "Launchpad";

/// The title of the launchpad link.
const LINK_TITLE: &str = "Fiori Launchpad";

json_struct_nodefault! {
	/// A navigation link contributed to the hosting service's index page.
	#[derive(Clone)]
	pub struct Link {
		/// The link target.
		pub href: String,

		/// The link name.
		pub name: String,

		/// The link title.
		pub title: String,
	}
}

/// A link provider, evaluated per request.
/// `entity` is None at the top level.
type Provider = Box<dyn Fn(Option<&str>) -> Option<Link> + Send + Sync>;

/// A registry of link providers, owned by the hosting service.
///
/// Providers are appended once at setup and evaluated per request.
/// The registry is append-only; there is no removal path.
#[derive(Default)]
pub struct LinkRegistry {
	providers: Vec<Provider>,
}

impl LinkRegistry {
	/// Creates a new, empty registry.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a link provider.
	///
	/// # Arguments
	///
	/// * `provider` - The provider. It takes the entity being indexed (None at
	///   the top level) and returns the link to contribute, if any.
	pub fn add<F>(&mut self, provider: F)
	where
		F: Fn(Option<&str>) -> Option<Link> + Send + Sync + 'static,
	{
		self.providers.push(Box::new(provider));
	}

	/// Evaluates all providers for an entity and collects the contributed links.
	///
	/// # Arguments
	///
	/// * `entity` - The entity being indexed, or None at the top level.
	#[must_use]
	pub fn links(&self, entity: Option<&str>) -> Vec<Link> {
		self.providers
			.iter()
			.filter_map(|provider| provider(entity))
			.collect()
	}
}

/// Registers the launchpad link with a registry.
///
/// The link is contributed at the top (non-entity) level only; entity-level
/// evaluations contribute nothing.
///
/// # Arguments
///
/// * `registry` - The registry to register with.
/// * `base_path` - The mount path the link points at.
pub fn register(registry: &mut LinkRegistry, base_path: &str) {
	let href = base_path.to_owned();

	registry.add(move |entity| {
		// Entity-level pages skip the link.
		if entity.is_some() {
			return None;
		}

		Some(Link {
			href: href.clone(),
			name: LINK_NAME.to_owned(),
			title: LINK_TITLE.to_owned(),
		})
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn top_level() {
		let mut registry = LinkRegistry::new();
		register(&mut registry, "/$launchpad");

		let links = registry.links(None);

		assert_eq!(links.len(), 1);
		assert_eq!(links[0].href, "/$launchpad");
		assert_eq!(links[0].name, "Launchpad");
		assert_eq!(links[0].title, "Fiori Launchpad");
	}

	#[test]
	fn entity_level() {
		let mut registry = LinkRegistry::new();
		register(&mut registry, "/$launchpad");

		// Entity pages get no launchpad link.
		assert!(registry.links(Some("Books")).is_empty());
	}

	#[test]
	fn append_only() {
		let mut registry = LinkRegistry::new();
		register(&mut registry, "/$launchpad");
		register(&mut registry, "/$other");

		let links = registry.links(None);

		assert_eq!(links.len(), 2);
		assert_eq!(links[1].href, "/$other");
	}
}
