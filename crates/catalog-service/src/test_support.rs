//! In-memory repositories and a ready-made context for service tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use catalog_common::{verify_password, JwtService, PasswordService};
use catalog_core::{
    NewReview, NewTitle, NewUser, Page, PageRequest, Reaction, ReactionChange, ReactionOutcome,
    ReactionRepository, ReactionTarget, ReactionType, RepoResult, Review, ReviewFilter,
    ReviewRepository, Role, Title, TitleFilter, TitlePatch, TitleRepository, User, UserFilter,
    UserPatch, UserRepository, DomainError,
};
use chrono::Utc;

use crate::email::{Mailer, RecordingEmailSender};
use crate::services::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    titles: Vec<Title>,
    reviews: Vec<Review>,
    reactions: Vec<Reaction>,
    reaction_writes: usize,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn drop_reactions_on(&mut self, target: ReactionTarget) {
        self.reactions.retain(|r| r.target != target);
    }

    fn drop_review(&mut self, id: i64) -> bool {
        let Some(pos) = self.reviews.iter().position(|r| r.id == id) else {
            return false;
        };
        let review = self.reviews.remove(pos);
        if let Some(title) = self.titles.iter_mut().find(|t| t.id == review.title_id) {
            title.reviews = (title.reviews - 1).max(0);
        }
        self.drop_reactions_on(ReactionTarget::Review(id));
        true
    }
}

fn paginate<T: Clone>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = i64::try_from(items.len()).unwrap();
    let offset = usize::try_from(request.offset()).unwrap();
    let rows = items
        .into_iter()
        .skip(offset)
        .take(request.limit as usize)
        .collect();
    Page::new(rows, total, request)
}

/// All four repositories over one shared in-memory state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn list(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Page<User>> {
        let needle = filter.username.as_deref().map(str::to_lowercase);
        let users = self
            .lock()
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .filter(|u| {
                needle
                    .as_deref()
                    .map_or(true, |n| u.username.to_lowercase().contains(n))
                    && filter.id.map_or(true, |id| u.id == id)
            })
            .collect();
        Ok(paginate(users, page))
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let now = Utc::now();
        let created = User {
            id: state.next_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            avatar: user.avatar.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), user.password_hash.clone()));
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> RepoResult<Option<User>> {
        let mut state = self.lock();
        let Some((user, hash)) = state.users.iter_mut().find(|(u, _)| u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = &patch.username {
            user.username.clone_from(username);
        }
        if let Some(email) = &patch.email {
            user.email.clone_from(email);
        }
        if let Some(password_hash) = &patch.password_hash {
            hash.clone_from(password_hash);
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(active) = patch.is_active {
            user.is_active = active;
        }
        if let Some(avatar) = &patch.avatar {
            user.avatar = Some(avatar.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_active(&self, id: i64, active: bool) -> RepoResult<bool> {
        let mut state = self.lock();
        Ok(match state.users.iter_mut().find(|(u, _)| u.id == id) {
            Some((user, _)) => {
                user.is_active = active;
                true
            }
            None => false,
        })
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool> {
        let mut state = self.lock();
        Ok(match state.users.iter_mut().find(|(u, _)| u.id == id) {
            Some((_, hash)) => {
                *hash = password_hash.to_string();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|(u, _)| u.id != id);
        if state.users.len() == before {
            return Ok(false);
        }
        let authored: Vec<i64> = state
            .reviews
            .iter()
            .filter(|r| r.user_id == id)
            .map(|r| r.id)
            .collect();
        for review_id in authored {
            state.drop_review(review_id);
        }
        state.reactions.retain(|r| r.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TitleRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Title>> {
        Ok(self.lock().titles.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Title>> {
        Ok(self.lock().titles.iter().find(|t| t.slug == slug).cloned())
    }

    async fn list(&self, filter: &TitleFilter, page: PageRequest) -> RepoResult<Page<Title>> {
        let needle = filter.name.as_deref().map(str::to_lowercase);
        let titles = self
            .lock()
            .titles
            .iter()
            .filter(|t| {
                needle
                    .as_deref()
                    .map_or(true, |n| t.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        Ok(paginate(titles, page))
    }

    async fn create(&self, title: &NewTitle) -> RepoResult<Title> {
        let mut state = self.lock();
        if state
            .titles
            .iter()
            .any(|t| t.name == title.name || t.slug == title.slug)
        {
            return Err(DomainError::TitleAlreadyExists);
        }
        let now = Utc::now();
        let created = Title {
            id: state.next_id(),
            name: title.name.clone(),
            slug: title.slug.clone(),
            description: title.description.clone(),
            trailer: title.trailer.clone(),
            image: title.image.clone(),
            reviews: 0,
            created_at: now,
            updated_at: now,
        };
        state.titles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &TitlePatch) -> RepoResult<Option<Title>> {
        let mut state = self.lock();
        let Some(title) = state.titles.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            title.name.clone_from(name);
        }
        if let Some(slug) = &patch.slug {
            title.slug.clone_from(slug);
        }
        if let Some(description) = &patch.description {
            title.description.clone_from(description);
        }
        if let Some(trailer) = &patch.trailer {
            title.trailer = Some(trailer.clone());
        }
        if let Some(image) = &patch.image {
            title.image = Some(image.clone());
        }
        title.updated_at = Utc::now();
        Ok(Some(title.clone()))
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.titles.len();
        state.titles.retain(|t| t.id != id);
        if state.titles.len() == before {
            return Ok(false);
        }
        let reviews: Vec<i64> = state
            .reviews
            .iter()
            .filter(|r| r.title_id == id)
            .map(|r| r.id)
            .collect();
        for review_id in reviews {
            state.drop_review(review_id);
        }
        state.drop_reactions_on(ReactionTarget::Title(id));
        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>> {
        Ok(self.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, filter: &ReviewFilter, page: PageRequest) -> RepoResult<Page<Review>> {
        let reviews = self
            .lock()
            .reviews
            .iter()
            .filter(|r| filter.title_id.map_or(true, |id| r.title_id == id))
            .cloned()
            .collect();
        Ok(paginate(reviews, page))
    }

    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let mut state = self.lock();
        let id = state.next_id();
        let Some(title) = state.titles.iter_mut().find(|t| t.id == review.title_id) else {
            return Err(DomainError::TitleNotFound(review.title_id.to_string()));
        };
        title.reviews += 1;
        let created = Review {
            id,
            title_id: review.title_id,
            user_id: review.user_id,
            content: review.content.clone(),
            created_at: Utc::now(),
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.lock().drop_review(id))
    }

    async fn find_authors(&self, review_ids: &[i64]) -> RepoResult<Vec<(i64, i64)>> {
        Ok(self
            .lock()
            .reviews
            .iter()
            .filter(|r| review_ids.contains(&r.id))
            .map(|r| (r.id, r.user_id))
            .collect())
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, user_id: i64, target: ReactionTarget) -> RepoResult<Option<Reaction>> {
        Ok(self
            .lock()
            .reactions
            .iter()
            .find(|r| r.user_id == user_id && r.target == target)
            .cloned())
    }

    async fn toggle(
        &self,
        user_id: i64,
        target: ReactionTarget,
        kind: ReactionType,
    ) -> RepoResult<ReactionOutcome> {
        let mut state = self.lock();
        let exists = match target {
            ReactionTarget::Title(id) => state.titles.iter().any(|t| t.id == id),
            ReactionTarget::Review(id) => state.reviews.iter().any(|r| r.id == id),
        };
        if !exists {
            return Err(match target {
                ReactionTarget::Title(id) => DomainError::TitleNotFound(id.to_string()),
                ReactionTarget::Review(id) => DomainError::ReviewNotFound(id),
            });
        }

        state.reaction_writes += 1;
        let existing = state
            .reactions
            .iter()
            .find(|r| r.user_id == user_id && r.target == target)
            .cloned();

        Ok(match ReactionChange::plan(existing.as_ref(), kind) {
            ReactionChange::Insert(kind) => {
                let reaction = Reaction {
                    id: state.next_id(),
                    user_id,
                    target,
                    kind,
                    created_at: Utc::now(),
                };
                state.reactions.push(reaction.clone());
                ReactionOutcome::Created(reaction)
            }
            ReactionChange::Delete { id } => {
                state.reactions.retain(|r| r.id != id);
                ReactionOutcome::Removed
            }
            ReactionChange::Update { id, kind } => {
                let row = state
                    .reactions
                    .iter_mut()
                    .find(|r| r.id == id)
                    .unwrap();
                row.kind = kind;
                ReactionOutcome::Switched(row.clone())
            }
        })
    }

    async fn find_by_titles(&self, title_ids: &[i64]) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .lock()
            .reactions
            .iter()
            .filter(|r| matches!(r.target, ReactionTarget::Title(id) if title_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn find_by_reviews(&self, review_ids: &[i64]) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .lock()
            .reactions
            .iter()
            .filter(|r| matches!(r.target, ReactionTarget::Review(id) if review_ids.contains(&id)))
            .cloned()
            .collect())
    }
}

/// A service context wired to a [`MemoryStore`] and a recording mail outbox
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub outbox: RecordingEmailSender,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_sender(RecordingEmailSender::new())
    }

    pub fn with_failing_mail() -> Self {
        Self::with_sender(RecordingEmailSender::failing())
    }

    fn with_sender(outbox: RecordingEmailSender) -> Self {
        let store = Arc::new(MemoryStore::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .title_repo(store.clone())
            .review_repo(store.clone())
            .reaction_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600, 7200, 600)))
            .mailer(Mailer::new(
                Arc::new(outbox.clone()),
                "http://localhost:3000",
            ))
            .build()
            .unwrap();
        Self { ctx, store, outbox }
    }

    pub async fn add_user(&self, username: &str, role: Role, password: &str) -> User {
        self.insert_user(username, role, true, password).await
    }

    pub async fn add_inactive_user(&self, username: &str, password: &str) -> User {
        self.insert_user(username, Role::User, false, password).await
    }

    async fn insert_user(&self, username: &str, role: Role, active: bool, password: &str) -> User {
        let password_hash = PasswordService::new().hash(password).unwrap();
        UserRepository::create(
            self.store.as_ref(),
            &NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash,
                role,
                is_active: active,
                avatar: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn add_title(&self, name: &str) -> Title {
        TitleRepository::create(
            self.store.as_ref(),
            &NewTitle::new(name.to_string(), None, String::new(), None, None).unwrap(),
        )
        .await
        .unwrap()
    }

    pub async fn add_review(&self, title_id: i64, user_id: i64) -> Review {
        ReviewRepository::create(
            self.store.as_ref(),
            &NewReview {
                title_id,
                user_id,
                content: "Worth watching".to_string(),
            },
        )
        .await
        .unwrap()
    }

    pub fn user_by_name(&self, username: &str) -> Option<User> {
        self.store
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone())
    }

    pub fn password_matches(&self, user_id: i64, password: &str) -> bool {
        let state = self.store.lock();
        let (_, hash) = state.users.iter().find(|(u, _)| u.id == user_id).unwrap();
        verify_password(password, hash).unwrap()
    }

    pub fn reactions_of(&self, user_id: i64, target: ReactionTarget) -> Vec<Reaction> {
        self.store
            .lock()
            .reactions
            .iter()
            .filter(|r| r.user_id == user_id && r.target == target)
            .cloned()
            .collect()
    }

    pub fn reaction_count(&self) -> usize {
        self.store.lock().reactions.len()
    }

    pub fn reaction_writes(&self) -> usize {
        self.store.lock().reaction_writes
    }
}
