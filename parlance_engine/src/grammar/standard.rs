//! The built-in pattern table, modelled on Inform's standard grammar.
//!
//! Every pattern here is registered in the `Standard` category and therefore cannot be
//! removed, only disabled.

use super::{GrammarPattern, PatternCategory};
use crate::actions::*;

fn pattern(template: &str, action: &str, priority: i32) -> GrammarPattern {
    GrammarPattern::new(template, action)
        .with_category(PatternCategory::Standard)
        .with_priority(priority)
}

/// Full standard grammar.
#[allow(clippy::too_many_lines)]
pub fn standard_grammar() -> Vec<GrammarPattern> {
    let table: &[(&str, &str, i32)] = &[
        // taking
        ("take|get <noun>", TAKING, 50),
        ("take off <noun:worn>", TAKING_OFF, 60),
        ("take <noun:worn> off", TAKING_OFF, 60),
        ("take <noun> from <noun:container>", REMOVING, 55),
        ("take <noun> off <noun:supporter>", REMOVING, 55),
        ("take inventory", INVENTORY, 70),
        ("pick up <noun>", TAKING, 50),
        ("pick <noun> up", TAKING, 50),
        ("carry <noun>", TAKING, 45),
        ("hold <noun>", TAKING, 45),
        // dropping
        ("drop <noun:held>", DROPPING, 50),
        ("drop <noun> in|into <noun:container>", INSERTING, 55),
        ("drop <noun> on|onto <noun:supporter>", PUTTING, 55),
        ("put down <noun:held>", DROPPING, 50),
        ("put <noun:held> down", DROPPING, 50),
        ("throw <noun:held>", DROPPING, 45),
        ("discard <noun:held>", DROPPING, 45),
        // inserting and putting
        ("put <noun> in|into <noun:container>", INSERTING, 50),
        ("put <noun> on|onto <noun:supporter>", PUTTING, 50),
        ("put on <noun:wearable>", WEARING, 55),
        ("put <noun:wearable> on", WEARING, 55),
        ("insert <noun> in|into <noun:container>", INSERTING, 50),
        // removing
        ("remove <noun:held>", TAKING_OFF, 50),
        ("remove <noun> from <noun:container>", REMOVING, 50),
        ("get <noun> from <noun:container>", REMOVING, 50),
        // wearing
        ("wear <noun:wearable>", WEARING, 50),
        ("don <noun:wearable>", WEARING, 45),
        ("shed <noun:worn>", TAKING_OFF, 45),
        ("doff <noun:worn>", TAKING_OFF, 45),
        ("disrobe <noun:worn>", TAKING_OFF, 45),
        // movement
        ("go", GOING, 40),
        ("go <direction>", GOING, 50),
        ("go <noun:door>", ENTERING, 45),
        ("go into|in|inside|through <noun:enterable>", ENTERING, 50),
        ("walk", GOING, 35),
        ("walk <direction>", GOING, 45),
        ("run", GOING, 35),
        ("run <direction>", GOING, 45),
        ("north|n", GOING, 60),
        ("south|s", GOING, 60),
        ("east|e", GOING, 60),
        ("west|w", GOING, 60),
        ("northeast|ne", GOING, 60),
        ("northwest|nw", GOING, 60),
        ("southeast|se", GOING, 60),
        ("southwest|sw", GOING, 60),
        ("up|u", GOING, 60),
        ("down|d", GOING, 60),
        ("in", GOING, 60),
        ("out", GOING, 60),
        // entering and exiting
        ("enter", ENTERING, 45),
        ("enter <noun:enterable>", ENTERING, 50),
        ("get in|on", ENTERING, 45),
        ("get in|into|on|onto <noun:enterable>", ENTERING, 50),
        ("sit on|in|inside <noun:enterable>", ENTERING, 50),
        ("stand on <noun:supporter>", ENTERING, 50),
        ("climb <noun>", CLIMBING, 50),
        ("climb up|over <noun>", CLIMBING, 50),
        ("exit", EXITING, 50),
        ("leave", EXITING, 50),
        ("get out|off|down|up", EXITING, 50),
        ("get off <noun:supporter>", GETTING_OFF, 50),
        ("stand", EXITING, 45),
        ("stand up", EXITING, 45),
        // examining
        ("examine|x <noun>", EXAMINING, 50),
        ("look", LOOKING, 50),
        ("look at <noun>", EXAMINING, 50),
        ("look <noun>", EXAMINING, 45),
        ("l", LOOKING, 60),
        ("look inside|in|into|through <noun:container>", SEARCHING, 55),
        ("look under <noun>", LOOKING_UNDER, 50),
        ("search <noun>", SEARCHING, 50),
        ("read <noun>", EXAMINING, 50),
        ("watch <noun>", EXAMINING, 45),
        ("describe <noun>", EXAMINING, 45),
        ("check <noun>", EXAMINING, 45),
        // consulting
        ("consult <noun> on|about <text>", CONSULTING, 50),
        ("look up <text> in <noun>", CONSULTING, 50),
        ("read about <text> in <noun>", CONSULTING, 50),
        // opening and closing
        ("open <noun:openable>", OPENING, 50),
        ("open <noun:lockable> with <noun:held>", UNLOCKING, 55),
        ("close <noun:openable>", CLOSING, 50),
        ("shut <noun:openable>", CLOSING, 45),
        ("unwrap <noun>", OPENING, 40),
        ("uncover <noun>", OPENING, 40),
        ("cover <noun>", CLOSING, 40),
        // locking
        ("lock <noun:lockable> with <noun:held>", LOCKING, 50),
        ("unlock <noun:lockable> with <noun:held>", UNLOCKING, 50),
        // switching
        ("switch <noun:switchedOn>", SWITCHING_OFF, 55),
        ("switch <noun:switchable>", SWITCHING_ON, 50),
        ("switch on <noun:switchable>", SWITCHING_ON, 55),
        ("switch <noun:switchable> on", SWITCHING_ON, 55),
        ("switch off <noun:switchedOn>", SWITCHING_OFF, 55),
        ("switch <noun:switchedOn> off", SWITCHING_OFF, 55),
        ("turn <noun:switchable> on", SWITCHING_ON, 50),
        ("turn on <noun:switchable>", SWITCHING_ON, 50),
        ("turn <noun:switchedOn> off", SWITCHING_OFF, 50),
        ("turn off <noun:switchedOn>", SWITCHING_OFF, 50),
        ("close off <noun:switchedOn>", SWITCHING_OFF, 45),
        // physical manipulation
        ("push <noun>", PUSHING, 50),
        ("push <noun> <direction>", PUSHING_TO, 55),
        ("push <noun> to <direction>", PUSHING_TO, 55),
        ("pull <noun>", PULLING, 50),
        ("turn <noun>", TURNING, 50),
        ("set <noun> to <text>", SETTING, 50),
        ("move <noun>", PUSHING, 45),
        ("shift <noun>", PUSHING, 45),
        ("press <noun>", PUSHING, 45),
        ("drag <noun>", PULLING, 45),
        ("rotate <noun>", TURNING, 45),
        ("twist <noun>", TURNING, 45),
        ("adjust <noun> to <text>", SETTING, 45),
        // violence
        ("attack <noun>", ATTACKING, 50),
        ("hit <noun>", ATTACKING, 45),
        ("break <noun>", ATTACKING, 45),
        ("smash <noun>", ATTACKING, 45),
        ("fight <noun>", ATTACKING, 45),
        ("kill <noun>", ATTACKING, 45),
        ("murder <noun>", ATTACKING, 45),
        ("punch <noun>", ATTACKING, 45),
        ("kick <noun>", ATTACKING, 45),
        ("torture <noun>", ATTACKING, 40),
        ("wreck <noun>", ATTACKING, 40),
        ("crack <noun>", ATTACKING, 40),
        ("destroy <noun>", ATTACKING, 40),
        ("thump <noun>", ATTACKING, 40),
        // conversation
        ("ask <noun:person> about <text>", ASKING, 50),
        ("ask <noun:person> for <noun>", ASKING_FOR, 50),
        ("tell <noun:person> about <text>", TELLING, 50),
        ("answer <text> to <noun:person>", ANSWERING, 50),
        ("say <text> to <noun:person>", ANSWERING, 45),
        ("shout <text> to <noun:person>", ANSWERING, 45),
        ("speak <text> to <noun:person>", ANSWERING, 45),
        ("talk to <noun:person>", TALKING, 50),
        // giving and showing
        ("give <noun:held> to <noun:person>", GIVING, 50),
        ("give <noun:person> <noun:held>", GIVING, 50),
        ("show <noun> to <noun:person>", SHOWING, 50),
        ("show <noun:person> <noun>", SHOWING, 50),
        ("offer <noun:held> to <noun:person>", GIVING, 45),
        ("pay <noun:person> <noun:held>", GIVING, 45),
        ("feed <noun:person> <noun:held>", GIVING, 45),
        ("present <noun> to <noun:person>", SHOWING, 45),
        ("display <noun> to <noun:person>", SHOWING, 45),
        // senses
        ("smell", SMELLING, 45),
        ("smell <noun>", SMELLING, 50),
        ("sniff <noun>", SMELLING, 45),
        ("listen", LISTENING, 45),
        ("listen to <noun>", LISTENING, 50),
        ("hear <noun>", LISTENING, 45),
        ("taste <noun>", TASTING, 50),
        ("touch <noun>", TOUCHING, 50),
        ("feel <noun>", TOUCHING, 45),
        // other physical actions
        ("eat <noun:edible>", EATING, 50),
        ("drink <noun>", DRINKING, 50),
        ("swallow <noun>", DRINKING, 45),
        ("sip <noun>", DRINKING, 45),
        ("rub <noun>", RUBBING, 50),
        ("clean <noun>", RUBBING, 45),
        ("polish <noun>", RUBBING, 45),
        ("dust <noun>", RUBBING, 45),
        ("wipe <noun>", RUBBING, 45),
        ("scrub <noun>", RUBBING, 45),
        ("sweep <noun>", RUBBING, 45),
        ("shine <noun>", RUBBING, 45),
        ("squeeze <noun>", SQUEEZING, 50),
        ("squash <noun>", SQUEEZING, 45),
        ("burn <noun>", BURNING, 50),
        ("light <noun>", BURNING, 45),
        ("cut <noun>", CUTTING, 50),
        ("slice <noun>", CUTTING, 45),
        ("chop <noun>", CUTTING, 45),
        ("prune <noun>", CUTTING, 45),
        ("tie <noun> to <noun>", TYING, 50),
        ("attach <noun> to <noun>", TYING, 45),
        ("fasten <noun> to <noun>", TYING, 45),
        ("swing <noun>", SWINGING, 50),
        ("swing on <noun>", SWINGING, 50),
        ("wave", WAVING_HANDS, 50),
        ("wave <noun>", WAVING, 50),
        ("throw <noun:held> at|to <noun>", THROWING, 50),
        ("use <noun>", USING, 50),
        ("use <noun> on|with <noun>", USING, 50),
        // simple actions
        ("wait", WAITING, 50),
        ("z", WAITING, 60),
        ("sleep", SLEEPING, 50),
        ("nap", SLEEPING, 45),
        ("wake", WAKING_UP, 45),
        ("wake up", WAKING_UP, 50),
        ("wake <noun:person>", WAKING, 50),
        ("wake <noun:person> up", WAKING, 50),
        ("wake up <noun:person>", WAKING, 50),
        ("awake", WAKING_UP, 45),
        ("awaken", WAKING_UP, 45),
        ("kiss <noun:person>", KISSING, 50),
        ("hug <noun:person>", KISSING, 45),
        ("embrace <noun:person>", KISSING, 45),
        ("think", THINKING, 50),
        ("jump", JUMPING, 50),
        ("hop", JUMPING, 45),
        ("skip", JUMPING, 45),
        ("buy <noun>", BUYING, 50),
        ("purchase <noun>", BUYING, 45),
        // inventory
        ("inventory", INVENTORY, 50),
        ("i", INVENTORY, 60),
        ("inv", INVENTORY, 55),
        // yes, no, sorry
        ("yes", SAYING_YES, 50),
        ("y", SAYING_YES, 60),
        ("no", SAYING_NO, 50),
        ("sorry", SAYING_SORRY, 50),
        // meta
        ("quit", QUITTING, 50),
        ("q", QUITTING, 60),
        ("save", SAVING, 50),
        ("restore", RESTORING, 50),
        ("restart", RESTARTING, 50),
        ("score", SCORING, 50),
        ("version", VERSION, 50),
        ("verify", VERSION, 45),
        ("script", TRANSCRIPT_ON, 50),
        ("script on", TRANSCRIPT_ON, 55),
        ("transcript", TRANSCRIPT_ON, 50),
        ("transcript on", TRANSCRIPT_ON, 55),
        ("script off", TRANSCRIPT_OFF, 55),
        ("transcript off", TRANSCRIPT_OFF, 55),
        ("brief", BRIEF, 50),
        ("normal", BRIEF, 45),
        ("verbose", VERBOSE, 50),
        ("long", VERBOSE, 45),
        ("superbrief", SUPERBRIEF, 50),
        ("short", SUPERBRIEF, 45),
        ("nouns", PRONOUNS, 50),
        ("pronouns", PRONOUNS, 50),
        ("help|?", HELP, 50),
        ("about|credits", ABOUT, 50),
    ];
    table
        .iter()
        .map(|(template, action, priority)| pattern(template, action, *priority))
        .collect()
}

/// The handful of patterns a bare-bones game needs.
pub fn minimal_grammar() -> Vec<GrammarPattern> {
    vec![
        pattern("take|get <noun>", TAKING, 50),
        pattern("drop <noun:held>", DROPPING, 50),
        pattern("inventory|i", INVENTORY, 50),
        pattern("go <direction>", GOING, 50),
        pattern("north|n|south|s|east|e|west|w", GOING, 60),
        pattern("look|l", LOOKING, 50),
        pattern("examine|x <noun>", EXAMINING, 50),
        pattern("open <noun:openable>", OPENING, 50),
        pattern("close <noun:openable>", CLOSING, 50),
        pattern("quit|q", QUITTING, 50),
        pattern("save", SAVING, 50),
        pattern("restore", RESTORING, 50),
    ]
}
