//! Search and annotated listings

use crate::model::{AnnotatedClient, Client};
use crate::store::{ClientStore, StoreResult};
use crate::validation::ClientValidator;

/// Read-side views combining the store with the validator
#[derive(Debug, Clone)]
pub struct ClientQuery {
    store: ClientStore,
    validator: ClientValidator,
}

impl ClientQuery {
    pub fn new(store: ClientStore, validator: ClientValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &ClientStore {
        &self.store
    }

    pub fn validator(&self) -> &ClientValidator {
        &self.validator
    }

    /// Clients where any field contains `term`, ignoring case.
    ///
    /// Callers reject an empty term before getting here; an empty term would
    /// match every client.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Client>> {
        let needle = term.to_lowercase();
        Ok(self
            .store
            .list_all()?
            .into_iter()
            .filter(|client| matches_term(client, &needle))
            .collect())
    }

    /// Every client with its validation result, in store order
    pub fn list_annotated(&self) -> StoreResult<Vec<AnnotatedClient>> {
        Ok(self.annotate_all(self.store.list_all()?))
    }

    /// Only the clients that fail at least one rule
    pub fn list_only_with_errors(&self) -> StoreResult<Vec<AnnotatedClient>> {
        Ok(self
            .list_annotated()?
            .into_iter()
            .filter(|annotated| annotated.has_errors)
            .collect())
    }

    /// `search` results with their validation results
    pub fn search_annotated(&self, term: &str) -> StoreResult<Vec<AnnotatedClient>> {
        Ok(self.annotate_all(self.search(term)?))
    }

    fn annotate_all(&self, clients: Vec<Client>) -> Vec<AnnotatedClient> {
        clients
            .into_iter()
            .map(|client| self.validator.annotate(client))
            .collect()
    }
}

/// Whether any field of `client` contains `needle` (already lower-cased)
pub fn matches_term(client: &Client, needle: &str) -> bool {
    client
        .fields()
        .any(|field| field.to_lowercase().contains(needle))
}
