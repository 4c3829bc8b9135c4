//! The host page: named containers editors are mounted into.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// An element an editor fills. Its size follows the page's.
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    size: Arc<RwLock<Dimensions>>,
}

impl Container {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        *self.size.read()
    }
}

/// Elements by id, and the page size they share.
#[derive(Debug, Clone, Default)]
pub struct Page {
    containers: HashMap<String, Container>,
    size: Arc<RwLock<Dimensions>>,
}

impl Page {
    #[must_use]
    pub fn new(size: Dimensions) -> Self {
        Self {
            containers: HashMap::new(),
            size: Arc::new(RwLock::new(size)),
        }
    }

    /// Page holding one container per id.
    #[must_use]
    pub fn with_containers<'a>(size: Dimensions, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut page = Self::new(size);
        for id in ids {
            page.add_container(id);
        }
        page
    }

    pub fn add_container(&mut self, id: &str) {
        let container = Container {
            id: id.to_string(),
            size: Arc::clone(&self.size),
        };
        self.containers.insert(id.to_string(), container);
    }

    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    /// Change the page size. Editors pick it up on their next layout.
    pub fn resize(&self, size: Dimensions) {
        *self.size.write() = size;
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        *self.size.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_resize() {
        let page = Page::with_containers(Dimensions { width: 800, height: 600 }, ["a", "b"]);
        assert!(page.get_element_by_id("c").is_none());

        let a = page.get_element_by_id("a").unwrap();
        assert_eq!(a.id(), "a");
        page.resize(Dimensions { width: 1024, height: 768 });
        assert_eq!(a.dimensions().width, 1024);
    }
}
