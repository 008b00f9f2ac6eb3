mod bit;
mod convert;
