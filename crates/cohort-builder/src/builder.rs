//! Builder pattern for QueryBuilderFactory

use crate::config::BuilderConfig;
use crate::error::{BuilderError, Result};
use crate::query_builder::QueryBuilder;
use crate::registry::OperatorRegistry;
use cohort_core::Catalogue;
use cohort_schema::{Introspector, IntrospectorConfig, SchemaDocument};
use std::sync::Arc;

/// Shared catalogue, registry and configuration for creating sessions
#[derive(Debug, Clone)]
pub struct QueryBuilderFactory {
    registry: Arc<OperatorRegistry>,
    config: BuilderConfig,
}

impl QueryBuilderFactory {
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::new()
    }

    pub fn catalogue(&self) -> &Catalogue {
        self.registry.catalogue()
    }

    pub fn registry(&self) -> Arc<OperatorRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// New session with the default tree
    pub fn session(&self) -> QueryBuilder {
        QueryBuilder::new(self.registry(), self.config.clone())
    }

    /// New session over a stored wire JSON value
    pub fn load(&self, json: &str) -> Result<QueryBuilder> {
        let mut session = self.session();
        session.load_json(json)?;
        Ok(session)
    }

    /// Install a new catalogue with a fresh operator registry.
    ///
    /// Existing sessions keep the previous registry and catalogue.
    pub fn rebuild(&mut self, catalogue: Catalogue) {
        self.registry = Arc::new(OperatorRegistry::new(Arc::new(catalogue)));
        tracing::info!("Query builder catalogue replaced");
    }
}

enum CatalogueSource {
    Catalogue(Catalogue),
    Introspector(Box<Introspector>),
    Schema {
        content: String,
        config: IntrospectorConfig,
    },
}

/// Builder for QueryBuilderFactory
///
/// # Example
///
/// ```rust,ignore
/// use cohort_builder::{BuilderConfig, QueryBuilderFactory};
/// use cohort_schema::IntrospectorConfig;
///
/// let factory = QueryBuilderFactory::builder()
///     .with_schema(schema_yaml, IntrospectorConfig::from_yaml_str(config_yaml)?)
///     .allow_empty_rulesets(false)
///     .build()?;
///
/// let mut session = factory.session();
/// session.add_rule(&[]);
/// ```
pub struct FactoryBuilder {
    config: BuilderConfig,
    source: Option<CatalogueSource>,
}

impl FactoryBuilder {
    pub fn new() -> Self {
        Self {
            config: BuilderConfig::new(),
            source: None,
        }
    }

    // ========== Catalogue source ==========

    /// Use a prebuilt catalogue
    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.source = Some(CatalogueSource::Catalogue(catalogue));
        self
    }

    /// Use a configured introspector (custom producers, validators)
    pub fn with_introspector(mut self, introspector: Introspector) -> Self {
        self.source = Some(CatalogueSource::Introspector(Box::new(introspector)));
        self
    }

    /// Introspect schema text (YAML or JSON) at build time
    pub fn with_schema(mut self, content: impl Into<String>, config: IntrospectorConfig) -> Self {
        self.source = Some(CatalogueSource::Schema {
            content: content.into(),
            config,
        });
        self
    }

    // ========== Session configuration ==========

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the session configuration from YAML
    pub fn with_config_yaml(mut self, content: &str) -> Result<Self> {
        self.config = BuilderConfig::from_yaml_str(content)?;
        Ok(self)
    }

    pub fn allow_empty_rulesets(mut self, allow: bool) -> Self {
        self.config.allow_empty_rulesets = allow;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = read_only;
        self
    }

    pub fn start_with_default_rule(mut self, enable: bool) -> Self {
        self.config.start_with_default_rule = enable;
        self
    }

    /// Build the factory
    pub fn build(self) -> Result<QueryBuilderFactory> {
        let catalogue = match self.source {
            Some(CatalogueSource::Catalogue(catalogue)) => catalogue,
            Some(CatalogueSource::Introspector(introspector)) => introspector.build_catalogue(),
            Some(CatalogueSource::Schema { content, config }) => {
                let document = SchemaDocument::parse(&content)?;
                Introspector::new(document, config).build_catalogue()
            }
            None => {
                return Err(BuilderError::ConfigError(
                    "no catalogue, introspector or schema configured".to_string(),
                ))
            }
        };

        if catalogue.is_empty() {
            tracing::warn!("Query builder catalogue has no fields");
        }
        tracing::info!(
            "Query builder ready: {} entities, {} fields",
            catalogue.entities().count(),
            catalogue.len()
        );

        Ok(QueryBuilderFactory {
            registry: Arc::new(OperatorRegistry::new(Arc::new(catalogue))),
            config: self.config,
        })
    }
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
