mod reader;
mod round_trip;
