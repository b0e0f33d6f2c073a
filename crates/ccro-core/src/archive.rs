// ── Archive facade ──
//
// One backend connection plus the three stores that share it, and the
// current-user context activity records are attributed to. Cheap to clone.

use std::sync::Arc;

use ccro_api::ApiClient;
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::info;

use crate::config::ArchiveConfig;
use crate::error::CoreError;
use crate::ids::{IdGenerator, LocalIdGenerator};
use crate::model::{ActivityKind, ActivityLog, ArchiveBox, CurrentUser, EntityId, User};
use crate::policy::{Operation, propagate};
use crate::store::{ActivityLogStore, BoxStore, LocationProfileStore};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ArchiveInner>`. Nothing is fetched on
/// construction: call the stores' `load` methods to populate them.
#[derive(Clone)]
pub struct Archive {
    inner: Arc<ArchiveInner>,
}

struct ArchiveInner {
    config: ArchiveConfig,
    api: Arc<ApiClient>,
    boxes: BoxStore,
    locations: LocationProfileStore,
    activity: ActivityLogStore,
    current_user: watch::Sender<Option<CurrentUser>>,
}

impl Archive {
    /// Build the HTTP client described by `config` and empty stores around it.
    pub fn new(config: ArchiveConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.server.clone(), &config.transport())?;
        Ok(Self::with_api(config, api, Arc::new(LocalIdGenerator)))
    }

    /// Use a prebuilt client and id generator.
    pub fn with_api(config: ArchiveConfig, api: ApiClient, ids: Arc<dyn IdGenerator>) -> Self {
        let api = Arc::new(api);
        let activity = ActivityLogStore::with_id_generator(Arc::clone(&api), ids)
            .with_limit(config.log_limit);
        let (current_user, _) = watch::channel(None);

        Self {
            inner: Arc::new(ArchiveInner {
                boxes: BoxStore::new(Arc::clone(&api)),
                locations: LocationProfileStore::new(Arc::clone(&api)),
                activity,
                api,
                config,
                current_user,
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &ArchiveConfig {
        &self.inner.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn boxes(&self) -> &BoxStore {
        &self.inner.boxes
    }

    pub fn locations(&self) -> &LocationProfileStore {
        &self.inner.locations
    }

    pub fn activity(&self) -> &ActivityLogStore {
        &self.inner.activity
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.inner.current_user.borrow().clone()
    }

    pub fn subscribe_current_user(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.inner.current_user.subscribe()
    }

    /// Attribute subsequent activity records to `user` (`None` = anonymous).
    pub fn set_current_user(&self, user: Option<CurrentUser>) {
        self.inner.current_user.send_replace(user);
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Authenticate and make the returned user the current user.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<User, CoreError> {
        let user = propagate(
            Operation::Login,
            self.inner.api.login(username, password).await,
        )?;
        info!(username = %user.username, "logged in");
        self.set_current_user(Some(CurrentUser::from(&user)));
        Ok(user)
    }

    /// Forget the current user. Purely local.
    pub fn logout(&self) {
        self.set_current_user(None);
    }

    pub async fn get_user(&self, id: &EntityId) -> Result<User, CoreError> {
        propagate(Operation::GetUser, self.inner.api.get_user(id).await)
    }

    // ── Activity helpers ─────────────────────────────────────────────

    /// Record `kind` against the current user.
    pub async fn record(
        &self,
        kind: ActivityKind,
        details: &str,
        search_code: Option<&str>,
    ) -> ActivityLog {
        let user = self.current_user();
        self.inner
            .activity
            .add_log(user.as_ref(), kind.as_ref(), details, search_code)
            .await
    }

    /// Find cached boxes by code and record the search.
    ///
    /// Searches the boxes already loaded; call `boxes().load()` first for
    /// fresh results.
    pub async fn search_boxes(&self, code: &str) -> Vec<ArchiveBox> {
        let found = self.inner.boxes.find_by_code(code);
        let details = match found.as_slice() {
            [] => format!("no box found for {code}"),
            [only] => format!("found box {}", only.code),
            many => format!("found {} boxes for {code}", many.len()),
        };
        self.record(ActivityKind::Search, &details, Some(code)).await;
        found
    }
}
