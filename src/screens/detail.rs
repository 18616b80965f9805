use tracing::{debug, info};

use crate::app::navigation::DetailParams;
use crate::app::point_detail::{mail_draft, whatsapp_link};
use crate::app::ports::MailDraft;
use crate::context::AppContext;
use crate::error::{EcoletaError, Result};
use crate::screens::lifecycle::{PendingLoads, ScreenLifetime, ScreenState};
use crate::types::{PointDetail, PointId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub point_id: PointId,
    pub name: String,
    pub image_url: String,
    pub categories_label: String,
    pub address: String,
    pub email: String,
    pub whatsapp: String,
}

impl DetailView {
    fn from_detail(point_id: PointId, detail: &PointDetail) -> Self {
        let point = &detail.point;
        Self {
            point_id,
            name: point.name.clone(),
            image_url: point.image_url.clone(),
            categories_label: detail.categories_label(),
            address: format!("{}, {}", point.city, point.state_code),
            email: point.email.clone(),
            whatsapp: point.whatsapp.clone(),
        }
    }

    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&self.whatsapp)
    }

    pub fn mail_draft(&self) -> MailDraft {
        mail_draft(&self.email)
    }
}

const RECORD_LOAD: &str = "record";

#[derive(Clone)]
struct DetailShared {
    ctx: AppContext,
    params: DetailParams,
    lifetime: ScreenLifetime,
    state: ScreenState<Option<PointDetail>>,
}

impl DetailShared {
    async fn load(&self) {
        let result = self.ctx.details.load(self.params.point_id).await;
        if !self.lifetime.is_mounted() {
            debug!(point_id = self.params.point_id, "Detail unmounted; dropping record");
            return;
        }
        match result {
            Ok(detail) => *self.state.lock() = Some(detail),
            Err(e) => self.ctx.notices.report(&e),
        }
    }
}

/// One point's contact card; renders nothing until the record arrives
pub struct DetailScreen {
    shared: DetailShared,
    pending: PendingLoads,
}

impl DetailScreen {
    pub fn new(ctx: AppContext, params: Option<DetailParams>) -> Result<Self> {
        let params = params.ok_or(EcoletaError::InvalidRoutePayload("Detail requires a point id"))?;
        Ok(Self {
            shared: DetailShared {
                ctx,
                params,
                lifetime: ScreenLifetime::new(),
                state: ScreenState::new(None),
            },
            pending: PendingLoads::default(),
        })
    }

    /// Starts fetching the record in the background
    pub fn start(&self) {
        let shared = self.shared.clone();
        self.pending.spawn(RECORD_LOAD, async move { shared.load().await });
    }

    pub async fn mount(ctx: AppContext, params: Option<DetailParams>) -> Result<Self> {
        let screen = Self::new(ctx, params)?;
        screen.start();
        screen.settled().await;
        Ok(screen)
    }

    pub async fn settled(&self) {
        self.pending.wait_all().await;
    }

    pub async fn load(&self) {
        self.shared.load().await;
    }

    pub fn params(&self) -> DetailParams {
        self.shared.params
    }

    pub fn view(&self) -> Option<DetailView> {
        self.shared
            .state
            .lock()
            .as_ref()
            .map(|detail| DetailView::from_detail(self.shared.params.point_id, detail))
    }

    /// Opens the WhatsApp conversation; `Ok(false)` while the record is not loaded
    pub async fn open_whatsapp(&self) -> Result<bool> {
        let Some(view) = self.view() else {
            return Ok(false);
        };
        let url = view.whatsapp_link();
        info!(point_id = view.point_id, "Opening WhatsApp");
        self.shared
            .ctx
            .links
            .open_url(&url)
            .await
            .map_err(EcoletaError::ExternalApp)?;
        Ok(true)
    }

    /// Opens the mail composer; `Ok(false)` while the record is not loaded
    pub async fn compose_mail(&self) -> Result<bool> {
        let Some(view) = self.view() else {
            return Ok(false);
        };
        info!(point_id = view.point_id, "Composing mail");
        self.shared
            .ctx
            .links
            .compose_mail(&view.mail_draft())
            .await
            .map_err(EcoletaError::ExternalApp)?;
        Ok(true)
    }

    pub fn unmount(&self) {
        self.shared.lifetime.unmount();
    }
}

impl Drop for DetailScreen {
    fn drop(&mut self) {
        self.shared.lifetime.unmount();
    }
}
