//! The composed portfolio store: one collection per kind plus the metadata
//! singleton, all sharing one version ledger.

use std::sync::Arc;

use folio_core::{
    BlogPost, ContentItem, ContentKind, ContentSnapshot, Experience, FolioConfig, FolioResult,
    Metadata, Project, Skill, SkillCategory, VersionNumber, VersionRecord,
};

use crate::{ContentStore, SeedData, VersionLedger};

/// Selects the collection a content type lives in.
///
/// Implemented for every kind so generic code can reach the right
/// [`ContentStore`] without matching on [`ContentKind`] at runtime.
pub trait StoredKind: ContentItem {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self>;

    /// Id every write of this kind is forced to, for singletons.
    fn fixed_id(_store: &PortfolioStore) -> Option<&str> {
        None
    }
}

impl StoredKind for Project {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.projects
    }
}

impl StoredKind for Skill {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.skills
    }
}

impl StoredKind for Experience {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.experiences
    }
}

impl StoredKind for BlogPost {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.blog_posts
    }
}

impl StoredKind for SkillCategory {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.skill_categories
    }
}

impl StoredKind for Metadata {
    fn collection(store: &PortfolioStore) -> &ContentStore<Self> {
        &store.metadata
    }

    fn fixed_id(store: &PortfolioStore) -> Option<&str> {
        Some(store.metadata_id.as_str())
    }
}

/// Every content collection of one portfolio.
///
/// Owned by whoever composes it and passed by reference; there is no global
/// instance, so tests can build as many isolated stores as they like.
#[derive(Debug)]
pub struct PortfolioStore {
    ledger: Arc<VersionLedger>,
    projects: ContentStore<Project>,
    skills: ContentStore<Skill>,
    experiences: ContentStore<Experience>,
    blog_posts: ContentStore<BlogPost>,
    skill_categories: ContentStore<SkillCategory>,
    metadata: ContentStore<Metadata>,
    metadata_id: String,
}

impl PortfolioStore {
    /// Create an empty store.
    pub fn new(config: &FolioConfig) -> Self {
        let ledger = Arc::new(VersionLedger::new());
        Self {
            projects: ContentStore::new(Arc::clone(&ledger)),
            skills: ContentStore::new(Arc::clone(&ledger)),
            experiences: ContentStore::new(Arc::clone(&ledger)),
            blog_posts: ContentStore::new(Arc::clone(&ledger)),
            skill_categories: ContentStore::new(Arc::clone(&ledger)),
            metadata: ContentStore::new(Arc::clone(&ledger)),
            metadata_id: config.metadata_id.clone(),
            ledger,
        }
    }

    /// Create a store holding `seed` as its initial state.
    ///
    /// Seeded items have no history; see [`ContentStore::seed`].
    pub fn with_seed(config: &FolioConfig, seed: SeedData) -> FolioResult<Self> {
        let store = Self::new(config);
        store.projects.seed(seed.projects)?;
        store.skills.seed(seed.skills)?;
        store.experiences.seed(seed.experiences)?;
        store.blog_posts.seed(seed.blog_posts)?;
        store.skill_categories.seed(seed.skill_categories)?;
        if let Some(mut metadata) = seed.metadata {
            metadata.id = store.metadata_id.clone();
            store.metadata.seed(vec![metadata])?;
        }
        Ok(store)
    }

    /// Capture the live state of every collection.
    pub fn export(&self) -> FolioResult<SeedData> {
        Ok(SeedData {
            projects: self.projects.list()?,
            skills: self.skills.list()?,
            experiences: self.experiences.list()?,
            blog_posts: self.blog_posts.list()?,
            skill_categories: self.skill_categories.list()?,
            metadata: self.get_metadata()?,
        })
    }

    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    pub fn metadata_id(&self) -> &str {
        &self.metadata_id
    }

    /// The collection for `K`.
    pub fn collection<K: StoredKind>(&self) -> &ContentStore<K> {
        K::collection(self)
    }

    pub fn list<K: StoredKind>(&self) -> FolioResult<Vec<K>> {
        self.collection::<K>().list()
    }

    pub fn get<K: StoredKind>(&self, id: &str) -> FolioResult<Option<K>> {
        self.collection::<K>().get_by_id(id)
    }

    pub fn upsert<K: StoredKind>(&self, item: K, author: &str) -> FolioResult<K> {
        self.upsert_with_message(item, author, None)
            .map(|(item, _)| item)
    }

    /// Upsert, forcing the id for singleton kinds.
    pub fn upsert_with_message<K: StoredKind>(
        &self,
        mut item: K,
        author: &str,
        message: Option<String>,
    ) -> FolioResult<(K, VersionRecord)> {
        if let Some(id) = K::fixed_id(self) {
            item.set_id(id.to_string());
        }
        self.collection::<K>()
            .upsert_with_message(item, author, message)
    }

    pub fn delete<K: StoredKind>(&self, id: &str, author: &str) -> FolioResult<bool> {
        self.collection::<K>().delete(id, author)
    }

    pub fn get_metadata(&self) -> FolioResult<Option<Metadata>> {
        self.metadata.get_by_id(&self.metadata_id)
    }

    pub fn update_metadata(&self, metadata: Metadata, author: &str) -> FolioResult<Metadata> {
        self.upsert(metadata, author)
    }

    /// Write a snapshot back through its kind's normal upsert path.
    pub fn write_snapshot(
        &self,
        snapshot: ContentSnapshot,
        author: &str,
        message: Option<String>,
    ) -> FolioResult<(ContentSnapshot, VersionRecord)> {
        fn write<K: StoredKind>(
            store: &PortfolioStore,
            item: K,
            author: &str,
            message: Option<String>,
        ) -> FolioResult<(ContentSnapshot, VersionRecord)> {
            let (item, record) = store.upsert_with_message(item, author, message)?;
            Ok((item.into_snapshot(), record))
        }

        match snapshot {
            ContentSnapshot::Project(item) => write(self, item, author, message),
            ContentSnapshot::Skill(item) => write(self, item, author, message),
            ContentSnapshot::Experience(item) => write(self, item, author, message),
            ContentSnapshot::BlogPost(item) => write(self, item, author, message),
            ContentSnapshot::SkillCategory(item) => write(self, item, author, message),
            ContentSnapshot::Metadata(item) => write(self, item, author, message),
        }
    }

    pub fn list_versions(&self, kind: ContentKind, id: &str) -> FolioResult<Vec<VersionRecord>> {
        self.ledger.list_versions(kind, id)
    }

    pub fn get_version(
        &self,
        kind: ContentKind,
        id: &str,
        version: VersionNumber,
    ) -> FolioResult<Option<VersionRecord>> {
        self.ledger.get_version(kind, id, version)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_test_utils::fixtures::{
        sample_blog_post, sample_experience, sample_metadata, sample_project, sample_skill,
    };

    fn sample_seed() -> SeedData {
        SeedData {
            projects: vec![sample_project("p1", "Folio"), sample_project("p2", "Ledger")],
            skills: vec![sample_skill("s1", 90)],
            experiences: vec![sample_experience("e1")],
            blog_posts: vec![sample_blog_post("b1", "hello-world")],
            skill_categories: Vec::new(),
            metadata: Some(sample_metadata()),
        }
    }

    #[test]
    fn test_generic_dispatch_reaches_each_collection() {
        let store = PortfolioStore::new(&FolioConfig::default());
        store.upsert(sample_project("p1", "A"), "admin").unwrap();
        store.upsert(sample_skill("s1", 70), "admin").unwrap();

        assert_eq!(store.list::<Project>().unwrap().len(), 1);
        assert_eq!(store.list::<Skill>().unwrap().len(), 1);
        assert!(store.list::<BlogPost>().unwrap().is_empty());
        assert!(store.get::<Skill>("p1").unwrap().is_none());
    }

    #[test]
    fn test_metadata_is_keyed_by_fixed_id() {
        let store = PortfolioStore::new(&FolioConfig::default());
        assert!(store.get_metadata().unwrap().is_none());

        let mut metadata = sample_metadata();
        metadata.id = "something-else".to_string();
        let stored = store.update_metadata(metadata, "admin").unwrap();
        assert_eq!(stored.id, "portfolio");

        let mut second = sample_metadata();
        second.title = "Staff Engineer".to_string();
        store.update_metadata(second, "admin").unwrap();

        assert_eq!(store.get_metadata().unwrap().unwrap().title, "Staff Engineer");
        let versions = store.list_versions(ContentKind::Metadata, "portfolio").unwrap();
        assert_eq!(versions.len(), 2);
    }

    #[test]
    fn test_with_seed_and_export() {
        let seed = sample_seed();
        let store = PortfolioStore::with_seed(&FolioConfig::default(), seed.clone()).unwrap();
        assert!(store.ledger().is_empty().unwrap());

        let exported = store.export().unwrap();
        assert_eq!(exported.item_count(), seed.item_count());
        assert_eq!(exported.metadata.unwrap().id, "portfolio");
    }

    #[test]
    fn test_stores_are_isolated() {
        let a = PortfolioStore::new(&FolioConfig::default());
        let b = PortfolioStore::new(&FolioConfig::default());
        a.upsert(sample_project("p1", "A"), "admin").unwrap();
        assert!(b.get::<Project>("p1").unwrap().is_none());
        assert!(b.ledger().is_empty().unwrap());
    }

    #[test]
    fn test_write_snapshot_appends_new_version() {
        let store = PortfolioStore::new(&FolioConfig::default());
        store.upsert(sample_project("p1", "A"), "admin").unwrap();
        store.upsert(sample_project("p1", "B"), "admin").unwrap();

        let v1 = store
            .get_version(ContentKind::Project, "p1", 1)
            .unwrap()
            .unwrap();
        let (snapshot, record) = store
            .write_snapshot(v1.data, "admin", Some("restore".to_string()))
            .unwrap();

        assert_eq!(record.version, 3);
        assert_eq!(record.message.as_deref(), Some("restore"));
        assert_eq!(snapshot.kind(), ContentKind::Project);
        assert_eq!(store.get::<Project>("p1").unwrap().unwrap().title, "A");
    }
}
