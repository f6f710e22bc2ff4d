pub mod boxcollider;
pub mod enemy;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
pub mod weapon;
