pub mod freelancer;
pub mod interview;
