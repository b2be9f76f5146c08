mod helpers;
mod offsets;
