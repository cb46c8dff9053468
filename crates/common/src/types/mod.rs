use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of `GET /`, the human-facing service banner.
#[derive(Serialize, Deserialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
}
