pub mod publish;
pub mod designs;
