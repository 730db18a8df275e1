use thiserror::Error;

/// Errors raised while turning a cluster configuration into a scene
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Unknown pendant model '{0}'")]
    UnknownPendantModel(String),
    #[error("Pendant model '{0}' contains no mesh geometry")]
    EmptyTemplate(String),
    #[error("Canopy provides {points} attachment points for {pendants} pendants")]
    NoAttachmentPoints { points: usize, pendants: usize },
    #[error("Material key '{0}' is not in the scene's material list")]
    UnlistedMaterial(String),
    #[error("Invalid configuration code: {0}")]
    InvalidCode(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to serialize glTF document")]
    Json(#[from] serde_json::Error),
    #[error("Failed to load template for pendant model '{model}'")]
    Template {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type ClusterResult<T> = Result<T, ClusterError>;
