//! Configuration of a [`Session`](crate::session::Session).

use std::sync::Arc;

use crate::error::{ErrorSource, ForgeError, Result};
use crate::gateway::DesignGateway;
use crate::schematic::SchematicStyle;
use crate::waveform::WaveformStyle;

#[derive(Clone)]
pub struct ForgeConfig {
    pub gateway: Arc<dyn DesignGateway>,
    pub schematic_style: SchematicStyle,
    pub waveform_style: WaveformStyle,
}

#[derive(Default)]
pub struct ForgeConfigBuilder {
    pub gateway: Option<Arc<dyn DesignGateway>>,
    pub schematic_style: Option<SchematicStyle>,
    pub waveform_style: Option<WaveformStyle>,
}

impl ForgeConfig {
    #[inline]
    pub fn builder() -> ForgeConfigBuilder {
        ForgeConfigBuilder::default()
    }
}

impl std::fmt::Debug for ForgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeConfig")
            .field("gateway", &self.gateway.name())
            .field("schematic_style", &self.schematic_style)
            .field("waveform_style", &self.waveform_style)
            .finish()
    }
}

impl ForgeConfigBuilder {
    pub fn gateway<T>(&mut self, gateway: T) -> &mut Self
    where
        T: DesignGateway + 'static,
    {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    pub fn shared_gateway(&mut self, gateway: Arc<dyn DesignGateway>) -> &mut Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn schematic_style(&mut self, style: SchematicStyle) -> &mut Self {
        self.schematic_style = Some(style);
        self
    }

    pub fn waveform_style(&mut self, style: WaveformStyle) -> &mut Self {
        self.waveform_style = Some(style);
        self
    }

    /// Builds the configuration. A gateway is required.
    pub fn build(&self) -> Result<ForgeConfig> {
        let gateway = self
            .gateway
            .clone()
            .ok_or_else(|| ForgeError::new(ErrorSource::GatewayNotSpecified))?;
        Ok(ForgeConfig {
            gateway,
            schematic_style: self.schematic_style.clone().unwrap_or_default(),
            waveform_style: self.waveform_style.clone().unwrap_or_default(),
        })
    }
}
