mod config_startup;
mod motion;
mod properties;
