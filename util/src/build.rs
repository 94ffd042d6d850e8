macro_rules! env_or_none {
    ($name:ident, $env:literal) => {
        pub const $name: &str = match option_env!($env) {
            Some(v) => v,
            None => "<none>",
        };
    };
}

pub const PACKAGE: &str = "sensornet";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROFILE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

// set by CI
env_or_none!(COMMIT_HASH, "SENSORNET_GIT_SHA");
