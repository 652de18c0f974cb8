use clap::Parser;
use wasm_bindgen::prelude::*;

mod converter;
mod memory;
mod utils;

/// Options are read from the location hash, e.g. `#-vv&--flip-duration&800`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    memory: memory::MemoryProps,

    #[command(flatten)]
    converter: converter::ConverterProps,
}

impl Args {
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let document = document();
    let mut mounted = false;

    if let Some(root) = document.get_element_by_id("memory") {
        yew::Renderer::<memory::MemoryView>::with_root_and_props(root, args.memory).render();
        mounted = true;
    }

    if let Some(root) = document.get_element_by_id("converter") {
        yew::Renderer::<converter::ConverterView>::with_root_and_props(root, args.converter)
            .render();
        mounted = true;
    }

    if mounted {
        log::debug!("App started");
    } else {
        log::warn!("no id=\"memory\" or id=\"converter\" element to mount on");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();

        assert_eq!(args.memory.flip_duration, "1000");
        assert_eq!(args.memory.seed, None);
        assert_eq!(args.converter.api_url, flipmatch_core::DEFAULT_API_URL);
    }

    #[test]
    fn hash_options_are_split_on_ampersands() {
        let args =
            Args::from_location_hash("#-v&--flip-duration&100&--seed&9&--api-url&http://localhost:8080")
                .unwrap();

        assert_eq!(args.memory.flip_duration, "100");
        assert_eq!(args.memory.seed, Some(9));
        assert_eq!(args.converter.api_url, "http://localhost:8080");
        assert!(args.verbose.log_level().is_some());
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(Args::from_location_hash("#--board-size&4").is_err());
    }
}
