use std::sync::Arc;

use crate::adapters::{FfmpegRenderAdapter, FsCatalogAdapter, ProbeLibavAdapter, ReelConfig};
use crate::app::compose_interactor::ComposeInteractor;
use crate::ports::{CatalogPort, ProbePort, RenderPort};

pub trait AppContainer: Send + Sync {
    fn compose_interactor(&self) -> Arc<ComposeInteractor>;
}

pub struct DefaultAppContainer {
    compose_interactor: Arc<ComposeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters
    pub fn new(config: &ReelConfig) -> Self {
        let catalog_port = Arc::new(FsCatalogAdapter::new());
        let probe_port = Arc::new(ProbeLibavAdapter::new());
        let render_port = Arc::new(FfmpegRenderAdapter::new(
            config.runtime.ffmpeg_binary.clone(),
        ));

        Self::with_ports(
            catalog_port as Arc<dyn CatalogPort>,
            probe_port as Arc<dyn ProbePort>,
            render_port as Arc<dyn RenderPort>,
        )
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        catalog_port: Arc<dyn CatalogPort>,
        probe_port: Arc<dyn ProbePort>,
        render_port: Arc<dyn RenderPort>,
    ) -> Self {
        Self {
            compose_interactor: Arc::new(ComposeInteractor::new(
                catalog_port,
                probe_port,
                render_port,
            )),
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn compose_interactor(&self) -> Arc<ComposeInteractor> {
        Arc::clone(&self.compose_interactor)
    }
}
