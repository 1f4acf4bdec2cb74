//! Shared test support: in-memory port implementations over one store, so
//! cascade behaviour matches the database adapters, plus app construction
//! helpers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use spatify_backend::domain::ports::{
    AdminRepository, AdminRepositoryError, AmenityRepository, AmenityRepositoryError,
    MemoryImageStore, MoodRepository, MoodRepositoryError, NewsletterRepository,
    NewsletterRepositoryError, SpatiRecord, SpatiRepository, SpatiRepositoryError,
};
use spatify_backend::domain::{
    Admin, AdminAuthService, Amenity, AmenityAdminService, Mood, MoodAdminService,
    NewsletterService, NewsletterSubscriber, Spati, SpatiAdminService,
};
use spatify_backend::inbound::http::auth::AuthTokens;
use spatify_backend::inbound::http::state::HttpState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@x.com";
pub const ADMIN_PASSWORD: &str = "hunter2hunter2";

/// All tables behind one lock, mirroring the relational schema closely
/// enough for junction replacement and cascades to behave like Postgres.
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    spatis: HashMap<String, SpatiRecord>,
    junctions: Vec<(String, String)>,
    amenities: HashMap<String, Amenity>,
    moods: HashMap<String, Mood>,
    admins: Vec<Admin>,
    subscribers: Vec<NewsletterSubscriber>,
}

impl MemoryDb {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory db lock")
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    pub fn seed_admin(&self, email: &str, password: &str) {
        let hash = bcrypt::hash(password, 4).expect("test hash");
        self.lock().admins.push(Admin {
            id: "admin-1".into(),
            email: email.to_lowercase(),
            password_hash: hash,
            created_at: chrono::Utc::now(),
        });
    }
}

fn assemble(tables: &Tables, record: &SpatiRecord) -> Spati {
    let mut amenities: Vec<Amenity> = tables
        .junctions
        .iter()
        .filter(|(spati_id, _)| spati_id == &record.id)
        .filter_map(|(_, amenity_id)| tables.amenities.get(amenity_id).cloned())
        .collect();
    amenities.sort_by(|a, b| a.name.cmp(&b.name));

    let mood = record
        .mood_id
        .as_deref()
        .and_then(|mood_id| tables.moods.get(mood_id).cloned());

    Spati {
        id: record.id.clone(),
        name: record.name.clone(),
        description: record.description.clone(),
        latitude: record.latitude,
        longitude: record.longitude,
        address: record.address.clone(),
        hours: record.hours.clone(),
        store_type: record.store_type.clone(),
        rating: record.rating,
        image_url: record.image_url.clone(),
        mood,
        amenities,
    }
}

fn replace_junctions(tables: &mut Tables, spati_id: &str, amenity_ids: &[String]) {
    tables.junctions.retain(|(sid, _)| sid != spati_id);
    let mut seen = std::collections::HashSet::new();
    for amenity_id in amenity_ids {
        if seen.insert(amenity_id.as_str()) {
            tables
                .junctions
                .push((spati_id.to_owned(), amenity_id.clone()));
        }
    }
}

pub struct MemorySpatiRepository(pub Arc<MemoryDb>);

#[async_trait]
impl SpatiRepository for MemorySpatiRepository {
    async fn find_all(&self) -> Result<Vec<Spati>, SpatiRepositoryError> {
        let tables = self.0.lock();
        let mut all: Vec<Spati> = tables
            .spatis
            .values()
            .map(|record| assemble(&tables, record))
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Spati>, SpatiRepositoryError> {
        let tables = self.0.lock();
        Ok(tables.spatis.get(id).map(|record| assemble(&tables, record)))
    }

    async fn insert(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<(), SpatiRepositoryError> {
        let mut tables = self.0.lock();
        tables.spatis.insert(record.id.clone(), record.clone());
        replace_junctions(&mut tables, &record.id, amenity_ids);
        Ok(())
    }

    async fn update(
        &self,
        record: &SpatiRecord,
        amenity_ids: &[String],
    ) -> Result<bool, SpatiRepositoryError> {
        let mut tables = self.0.lock();
        if !tables.spatis.contains_key(&record.id) {
            return Ok(false);
        }
        tables.spatis.insert(record.id.clone(), record.clone());
        replace_junctions(&mut tables, &record.id, amenity_ids);
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, SpatiRepositoryError> {
        let mut tables = self.0.lock();
        tables.junctions.retain(|(spati_id, _)| spati_id != id);
        Ok(tables.spatis.remove(id).is_some())
    }
}

pub struct MemoryAmenityRepository(pub Arc<MemoryDb>);

#[async_trait]
impl AmenityRepository for MemoryAmenityRepository {
    async fn find_all(&self) -> Result<Vec<Amenity>, AmenityRepositoryError> {
        let tables = self.0.lock();
        let mut all: Vec<Amenity> = tables.amenities.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Amenity>, AmenityRepositoryError> {
        Ok(self.0.lock().amenities.get(id).cloned())
    }

    async fn insert(&self, amenity: &Amenity) -> Result<(), AmenityRepositoryError> {
        self.0
            .lock()
            .amenities
            .insert(amenity.id.clone(), amenity.clone());
        Ok(())
    }

    async fn update(&self, amenity: &Amenity) -> Result<bool, AmenityRepositoryError> {
        let mut tables = self.0.lock();
        if !tables.amenities.contains_key(&amenity.id) {
            return Ok(false);
        }
        tables.amenities.insert(amenity.id.clone(), amenity.clone());
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, AmenityRepositoryError> {
        let mut tables = self.0.lock();
        tables.junctions.retain(|(_, amenity_id)| amenity_id != id);
        Ok(tables.amenities.remove(id).is_some())
    }
}

pub struct MemoryMoodRepository(pub Arc<MemoryDb>);

#[async_trait]
impl MoodRepository for MemoryMoodRepository {
    async fn find_all(&self) -> Result<Vec<Mood>, MoodRepositoryError> {
        let tables = self.0.lock();
        let mut all: Vec<Mood> = tables.moods.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Mood>, MoodRepositoryError> {
        Ok(self.0.lock().moods.get(id).cloned())
    }

    async fn insert(&self, mood: &Mood) -> Result<(), MoodRepositoryError> {
        self.0.lock().moods.insert(mood.id.clone(), mood.clone());
        Ok(())
    }

    async fn update(&self, mood: &Mood) -> Result<bool, MoodRepositoryError> {
        let mut tables = self.0.lock();
        if !tables.moods.contains_key(&mood.id) {
            return Ok(false);
        }
        tables.moods.insert(mood.id.clone(), mood.clone());
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, MoodRepositoryError> {
        let mut tables = self.0.lock();
        for record in tables.spatis.values_mut() {
            if record.mood_id.as_deref() == Some(id) {
                record.mood_id = None;
            }
        }
        Ok(tables.moods.remove(id).is_some())
    }
}

pub struct MemoryAdminRepository(pub Arc<MemoryDb>);

#[async_trait]
impl AdminRepository for MemoryAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AdminRepositoryError> {
        Ok(self
            .0
            .lock()
            .admins
            .iter()
            .find(|admin| admin.email == email)
            .cloned())
    }

    async fn upsert(&self, admin: &Admin) -> Result<(), AdminRepositoryError> {
        let mut tables = self.0.lock();
        tables.admins.retain(|existing| existing.email != admin.email);
        tables.admins.push(admin.clone());
        Ok(())
    }
}

pub struct MemoryNewsletterRepository(pub Arc<MemoryDb>);

#[async_trait]
impl NewsletterRepository for MemoryNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, NewsletterRepositoryError> {
        Ok(self
            .0
            .lock()
            .subscribers
            .iter()
            .find(|subscriber| subscriber.email == email)
            .cloned())
    }

    async fn insert(
        &self,
        subscriber: &NewsletterSubscriber,
    ) -> Result<(), NewsletterRepositoryError> {
        let mut tables = self.0.lock();
        if tables
            .subscribers
            .iter()
            .any(|existing| existing.email == subscriber.email)
        {
            return Ok(());
        }
        tables.subscribers.push(subscriber.clone());
        Ok(())
    }
}

/// Build an [`HttpState`] over a fresh in-memory database with one seeded
/// admin. Returns the database and image store for assertions.
pub fn memory_state() -> (HttpState, Arc<MemoryDb>, Arc<MemoryImageStore>) {
    let db = Arc::new(MemoryDb::default());
    db.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD);
    let images = Arc::new(MemoryImageStore::default());

    let spatis = Arc::new(MemorySpatiRepository(db.clone()));
    let amenities = Arc::new(MemoryAmenityRepository(db.clone()));
    let moods = Arc::new(MemoryMoodRepository(db.clone()));

    let state = HttpState {
        spatis: spatis.clone(),
        amenities: amenities.clone(),
        moods: moods.clone(),
        spati_admin: SpatiAdminService::new(spatis, images.clone()),
        amenity_admin: AmenityAdminService::new(amenities, images.clone()),
        mood_admin: MoodAdminService::new(moods, images.clone()),
        auth: AdminAuthService::new(Arc::new(MemoryAdminRepository(db.clone()))),
        newsletter: NewsletterService::new(Arc::new(MemoryNewsletterRepository(db.clone()))),
        tokens: AuthTokens::new(TEST_JWT_SECRET, 1800),
        max_image_bytes: 5 * 1024 * 1024,
    };
    (state, db, images)
}
