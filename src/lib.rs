pub mod error;

pub mod service {
    pub mod batch;
    pub mod config_service;
    pub mod engine_locator;
    pub mod pandoc;
    pub mod process;
    pub mod sample;
    pub mod traits {
        pub mod i_service;
    }
    #[cfg(all(test, unix))]
    pub(crate) mod test_support;
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
    pub mod report;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod batch;
    pub mod conversion;
    pub mod engine;
    pub mod outcome;
}

pub mod utils {
    pub mod utils;
}
