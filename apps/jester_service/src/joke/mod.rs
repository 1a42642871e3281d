pub mod joke_controller;
pub mod joke_prompt;
pub mod joke_service;
pub mod topic;
