use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub message: String,
}

/// Body returned by the answering service. Extra fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub answer: Option<String>,
}
