//! Integration tests: complete input-driven workflows through the editor.

mod document_event_tests;
mod state_stack_tests;
