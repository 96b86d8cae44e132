pub mod composer;
pub mod constants;

#[cfg(not(tarpaulin_include))]
pub fn get_composer() -> composer::QrComposer {
    composer::QrComposer::new()
}
