mod assets;
mod discovery;
mod pipeline;
