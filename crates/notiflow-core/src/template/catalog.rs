//! In-memory catalog of message templates.

use notiflow_types::Template;
use uuid::Uuid;

/// Client-local collection of reusable message templates.
///
/// Templates are a composer convenience and never leave the client. Newest
/// templates list first.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, trimming both fields.
    ///
    /// Returns the new template, or `None` when either field is blank after
    /// trimming (the entry is silently rejected, matching the form
    /// behavior).
    pub fn add(&mut self, name: &str, content: &str) -> Option<&Template> {
        let name = name.trim();
        let content = content.trim();
        if name.is_empty() || content.is_empty() {
            return None;
        }
        let template = Template {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            content: content.to_string(),
        };
        self.templates.insert(0, template);
        self.templates.first()
    }

    /// Updates an existing template in place.
    ///
    /// Returns `false` when the id is unknown or either field is blank.
    pub fn update(&mut self, id: &str, name: &str, content: &str) -> bool {
        let name = name.trim();
        let content = content.trim();
        if name.is_empty() || content.is_empty() {
            return false;
        }
        match self.templates.iter_mut().find(|t| t.id == id) {
            Some(template) => {
                template.name = name.to_string();
                template.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a template. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    /// Looks up a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates, newest first.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_assigns_id() {
        let mut catalog = TemplateCatalog::new();
        let template = catalog.add("  Aviso feriado  ", "  No hay clases.  ").unwrap();
        assert_eq!(template.name, "Aviso feriado");
        assert_eq!(template.content, "No hay clases.");
        assert!(!template.id.is_empty());
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut catalog = TemplateCatalog::new();
        assert!(catalog.add("   ", "content").is_none());
        assert!(catalog.add("name", "").is_none());
        assert!(catalog.templates().is_empty());
    }

    #[test]
    fn test_newest_first() {
        let mut catalog = TemplateCatalog::new();
        catalog.add("first", "a");
        catalog.add("second", "b");
        assert_eq!(catalog.templates()[0].name, "second");
    }

    #[test]
    fn test_update_and_remove() {
        let mut catalog = TemplateCatalog::new();
        let id = catalog.add("name", "content").unwrap().id.clone();

        assert!(catalog.update(&id, "renamed", "changed"));
        assert_eq!(catalog.get(&id).unwrap().content, "changed");

        assert!(!catalog.update(&id, "", "changed"));
        assert!(!catalog.update("ghost", "a", "b"));

        assert!(catalog.remove(&id));
        assert!(!catalog.remove(&id));
        assert!(catalog.get(&id).is_none());
    }
}
