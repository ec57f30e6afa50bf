pub use {anyhow, csv, glob, itertools, log, rayon, statrs};
