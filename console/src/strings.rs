macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod generate {
    define_strings! {
        ASSIGNMENT =
            "Semicolon-separated list pairing every plate export with its \
            mapping grid (`input;mapping`, one pair per line).";
        SEPARATOR =
            "Field separator used inside the plate export blocks.";
    }
}

pub mod analyse {
    define_strings! {
        NUMERATOR =
            "Measurement used as the ratio numerator. Skips the interactive \
            prompt when given together with --denominator.";
        DENOMINATOR =
            "Measurement used as the ratio denominator.";
        NO_RATIO =
            "Never compute ratios, even for directories with two measurement \
            types.";
        PATTERN =
            "Glob pattern selecting the per-plate data files inside each data \
            subdirectory.";
    }
}

pub mod utils {
    define_strings! {
        DATA_DIR =
            "Directory holding one subdirectory of per-plate data files per \
            experiment.";
        VERBOSE =
            "Log debug messages. RUST_LOG overrides this flag.";
        THREADS =
            "Number of threads used to analyse directories. Defaults to \
            PLATEX_NUM_THREADS or the number of CPUs.";
        PROGRESS =
            "Display a progress bar.";
    }
}
