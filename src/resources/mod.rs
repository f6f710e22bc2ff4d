pub mod bloodlayer;
pub mod camera;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod particlepool;
pub mod projectilepool;
pub mod simrng;
pub mod simtuning;
pub mod spatialgrid;
pub mod spritecache;
pub mod stats;
pub mod wavestate;
pub mod worldtime;
