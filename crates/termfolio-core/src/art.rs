pub const LOGO: &str = r"  ____          _       ____            __ _
 / ___|___   __| | ___ / ___|_ __ __ _ / _| |_
| |   / _ \ / _` |/ _ \ |   | '__/ _` | |_| __|
| |__| (_) | (_| |  __/ |___| | | (_| |  _| |_
 \____\___/ \__,_|\___|\____|_|  \__,_|_|  \__|";

pub const TUX: &str = r"    .--.
   |o_o |
   |:_/ |
  //   \ \
 (|     | )
/'\_   _/`\
\___)=(___/";

pub const ART_NAMES: [&str; 2] = ["logo", "tux"];

pub fn named(name: &str) -> Option<&'static str> {
    match name {
        "logo" => Some(LOGO),
        "tux" => Some(TUX),
        _ => None,
    }
}

pub const JOKES: [&str; 4] = [
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "Why did the developer go broke? They used up all their cache.",
    "What's a programmer's favorite hangout place? Foo Bar.",
    "There are 10 kinds of people: those who read binary and those who don't.",
];
