//! Shared test fixtures and hand-written mock collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use atelier::application::creations::{
    GenerateArticleUseCase, GenerateBlogTitleUseCase, GenerateImageUseCase,
    ListPublishedCreationsUseCase, ListUserCreationsUseCase, RemoveBackgroundUseCase,
    RemoveObjectUseCase, ReviewResumeUseCase, ToggleLikeUseCase,
};
use atelier::application::entitlement::{ResolveEntitlementUseCase, UsageMeter};
use atelier::config::Config;
use atelier::domain::creation::{
    Creation, CreationError, CreationId, ICreationRepository, LikeOutcome, NewCreation,
};
use atelier::domain::entitlement::{
    Entitlement, EntitlementError, Plan, SubscriptionProvider, UsageStore,
};
use atelier::domain::identity::UserId;
use atelier::infrastructure::auth::SessionVerifier;
use atelier::infrastructure::llm::{ChatRequest, LlmError, LlmProvider};
use atelier::infrastructure::media::{
    ImageGenerator, MediaError, MediaSource, MediaStore, UploadedMedia,
};
use atelier::infrastructure::resume::{ResumeParseError, ResumeParser};
use atelier::presentation::controllers::AppState;
use atelier::presentation::extractors::AuthState;
use atelier::presentation::routes::create_router;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

// === Entitlement mocks ===

pub struct FixedPlanProvider(pub Plan);

#[async_trait]
impl SubscriptionProvider for FixedPlanProvider {
    async fn plan(&self, _user: &UserId) -> Result<Plan, EntitlementError> {
        Ok(self.0)
    }
}

#[derive(Default)]
pub struct InMemoryUsageStore {
    counters: Mutex<std::collections::HashMap<String, u32>>,
    writes: AtomicU32,
}

impl InMemoryUsageStore {
    pub fn with_usage(user: &str, value: u32) -> Self {
        let store = Self::default();
        store
            .counters
            .lock()
            .unwrap()
            .insert(user.to_string(), value);
        store
    }

    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn current(&self, user: &str) -> Option<u32> {
        self.counters.lock().unwrap().get(user).copied()
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn usage(&self, user: &UserId) -> Result<Option<u32>, EntitlementError> {
        Ok(self.counters.lock().unwrap().get(user.as_str()).copied())
    }

    async fn set_usage(&self, user: &UserId, value: u32) -> Result<(), EntitlementError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.counters
            .lock()
            .unwrap()
            .insert(user.as_str().to_string(), value);
        Ok(())
    }
}

// === Provider mocks ===

pub struct MockLlm {
    pub response: String,
    pub calls: Mutex<Vec<ChatRequest>>,
}

impl MockLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

pub struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(&self, _request: ChatRequest) -> Result<String, LlmError> {
        Err(LlmError::ServiceUnavailable("provider down".to_string()))
    }
}

pub struct StaticImageGenerator {
    pub calls: AtomicU32,
}

impl StaticImageGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn text_to_image(&self, _prompt: &str) -> Result<Vec<u8>, MediaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }
}

pub struct RecordingMediaStore {
    pub uploads: Mutex<Vec<bool>>,
}

impl RecordingMediaStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for RecordingMediaStore {
    async fn upload(
        &self,
        _source: MediaSource,
        remove_background: bool,
    ) -> Result<UploadedMedia, MediaError> {
        self.uploads.lock().unwrap().push(remove_background);
        Ok(UploadedMedia {
            public_id: "asset_1".to_string(),
            secure_url: "https://res.example.com/asset_1.png".to_string(),
        })
    }

    fn object_removal_url(&self, public_id: &str, object: &str) -> String {
        format!(
            "https://res.example.com/e_gen_remove:prompt_{}/{}",
            object.replace(' ', "%20"),
            public_id
        )
    }
}

/// Resume parser that skips real PDF parsing.
pub struct StubResumeParser;

impl ResumeParser for StubResumeParser {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, ResumeParseError> {
        Ok("Jane Doe. Ten years of systems programming.".to_string())
    }
}

// === Creation store mock ===

#[derive(Default)]
pub struct InMemoryCreationRepository {
    rows: Mutex<Vec<Creation>>,
    inserted: AtomicU32,
}

impl InMemoryCreationRepository {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<Creation> {
        self.rows.lock().unwrap().clone()
    }

    /// Seed a row directly, bypassing the insert path.
    pub fn seed(&self, user: &str, kind: atelier::domain::creation::CreationKind, publish: bool) -> CreationId {
        let sequence = self.inserted.fetch_add(1, Ordering::SeqCst);
        let creation = Creation {
            id: CreationId::generate(),
            user_id: UserId::new(user),
            prompt: format!("prompt {}", sequence),
            content: format!("content {}", sequence),
            kind,
            publish,
            likers: Vec::new(),
            created_at: Utc::now() + Duration::seconds(sequence as i64),
        };
        let id = creation.id;
        self.rows.lock().unwrap().push(creation);
        id
    }

    pub fn likers_of(&self, id: CreationId) -> Option<Vec<String>> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.likers.clone())
    }
}

#[async_trait]
impl ICreationRepository for InMemoryCreationRepository {
    async fn insert(&self, new: NewCreation) -> Result<Creation, CreationError> {
        let sequence = self.inserted.fetch_add(1, Ordering::SeqCst);
        let creation = Creation {
            id: CreationId::generate(),
            user_id: new.user_id,
            prompt: new.prompt,
            content: new.content,
            kind: new.kind,
            publish: new.publish,
            likers: Vec::new(),
            created_at: Utc::now() + Duration::seconds(sequence as i64),
        };
        self.rows.lock().unwrap().push(creation.clone());
        Ok(creation)
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Creation>, CreationError> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| &row.user_id == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_published(&self) -> Result<Vec<Creation>, CreationError> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.publish)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn toggle_like(
        &self,
        id: CreationId,
        user: &UserId,
    ) -> Result<Option<LikeOutcome>, CreationError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        let identity = user.as_str().to_string();
        if let Some(position) = row.likers.iter().position(|liker| liker == &identity) {
            row.likers.remove(position);
            Ok(Some(LikeOutcome::Unliked))
        } else {
            row.likers.push(identity);
            Ok(Some(LikeOutcome::Liked))
        }
    }
}

/// Failing store for persistence-error propagation tests.
pub struct FailingCreationRepository;

#[async_trait]
impl ICreationRepository for FailingCreationRepository {
    async fn insert(&self, _new: NewCreation) -> Result<Creation, CreationError> {
        Err(CreationError::database("connection reset"))
    }

    async fn list_for_user(&self, _user: &UserId) -> Result<Vec<Creation>, CreationError> {
        Err(CreationError::database("connection reset"))
    }

    async fn list_published(&self) -> Result<Vec<Creation>, CreationError> {
        Err(CreationError::database("connection reset"))
    }

    async fn toggle_like(
        &self,
        _id: CreationId,
        _user: &UserId,
    ) -> Result<Option<LikeOutcome>, CreationError> {
        Err(CreationError::database("connection reset"))
    }
}

// === Fixtures ===

pub fn entitlement(user: &str, plan: Plan, free_usage: u32) -> Entitlement {
    Entitlement {
        user_id: UserId::new(user),
        plan,
        free_usage,
    }
}

/// A fully wired application over mock collaborators.
pub struct TestApp {
    pub plan: Plan,
    pub usage: Arc<InMemoryUsageStore>,
    pub repo: Arc<InMemoryCreationRepository>,
    pub llm: Arc<MockLlm>,
    pub media: Arc<RecordingMediaStore>,
    pub config: Config,
}

impl TestApp {
    pub fn new(plan: Plan) -> Self {
        let mut config = Config::default();
        config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        config.server.enable_docs = false;

        Self {
            plan,
            usage: Arc::new(InMemoryUsageStore::default()),
            repo: Arc::new(InMemoryCreationRepository::default()),
            llm: Arc::new(MockLlm::new("generated text")),
            media: Arc::new(RecordingMediaStore::new()),
            config,
        }
    }

    pub fn state(&self) -> AppState {
        let subscription: Arc<dyn SubscriptionProvider> = Arc::new(FixedPlanProvider(self.plan));
        let usage: Arc<dyn UsageStore> = self.usage.clone();
        let llm: Arc<dyn LlmProvider> = self.llm.clone();
        let generator: Arc<dyn ImageGenerator> = Arc::new(StaticImageGenerator::new());
        let media: Arc<dyn MediaStore> = self.media.clone();
        let parser: Arc<dyn ResumeParser> = Arc::new(StubResumeParser);
        let repo: Arc<dyn ICreationRepository> = self.repo.clone();

        let meter = Arc::new(UsageMeter::new(usage.clone(), self.config.quota.free_limit));

        AppState {
            entitlement: Arc::new(ResolveEntitlementUseCase::new(subscription, usage)),
            generate_article: Arc::new(GenerateArticleUseCase::new(
                llm.clone(),
                repo.clone(),
                meter.clone(),
            )),
            generate_blog_title: Arc::new(GenerateBlogTitleUseCase::new(
                llm.clone(),
                repo.clone(),
                meter.clone(),
            )),
            generate_image: Arc::new(GenerateImageUseCase::new(
                generator,
                media.clone(),
                repo.clone(),
            )),
            remove_background: Arc::new(RemoveBackgroundUseCase::new(media.clone(), repo.clone())),
            remove_object: Arc::new(RemoveObjectUseCase::new(media, repo.clone())),
            review_resume: Arc::new(ReviewResumeUseCase::new(
                llm,
                parser,
                repo.clone(),
                self.config.quota.max_resume_bytes,
            )),
            list_user_creations: Arc::new(ListUserCreationsUseCase::new(repo.clone())),
            list_published_creations: Arc::new(ListPublishedCreationsUseCase::new(repo.clone())),
            toggle_like: Arc::new(ToggleLikeUseCase::new(repo)),
            auth: AuthState {
                verifier: Arc::new(SessionVerifier::new(&self.config.auth)),
            },
            config: Arc::new(self.config.clone()),
            startup_time: std::time::Instant::now(),
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state(), &self.config)
    }
}

/// Mint a session token the router's verifier will accept.
pub fn session_token(sub: &str) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
    }

    encode(
        &Header::default(),
        &Claims {
            sub: sub.to_string(),
            exp: (Utc::now().timestamp() + 3600) as usize,
        },
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
