//! Canonical action ids.
//!
//! Verbs in every language map onto these ids, and the standard grammar table targets them,
//! so action resolution never sees surface wording.

// Movement
pub const GOING: &str = "if.action.going";
pub const ENTERING: &str = "if.action.entering";
pub const EXITING: &str = "if.action.exiting";
pub const GETTING_OFF: &str = "if.action.getting_off";
pub const CLIMBING: &str = "if.action.climbing";

// Observation
pub const LOOKING: &str = "if.action.looking";
pub const EXAMINING: &str = "if.action.examining";
pub const LOOKING_UNDER: &str = "if.action.looking_under";
pub const SEARCHING: &str = "if.action.searching";
pub const CONSULTING: &str = "if.action.consulting";
pub const LISTENING: &str = "if.action.listening";
pub const SMELLING: &str = "if.action.smelling";
pub const TASTING: &str = "if.action.tasting";
pub const TOUCHING: &str = "if.action.touching";

// Object manipulation
pub const TAKING: &str = "if.action.taking";
pub const DROPPING: &str = "if.action.dropping";
pub const PUTTING: &str = "if.action.putting";
pub const INSERTING: &str = "if.action.inserting";
pub const REMOVING: &str = "if.action.removing";
pub const OPENING: &str = "if.action.opening";
pub const CLOSING: &str = "if.action.closing";
pub const LOCKING: &str = "if.action.locking";
pub const UNLOCKING: &str = "if.action.unlocking";
pub const THROWING: &str = "if.action.throwing";
pub const USING: &str = "if.action.using";

// Devices and physical manipulation
pub const SWITCHING_ON: &str = "if.action.switching_on";
pub const SWITCHING_OFF: &str = "if.action.switching_off";
pub const PUSHING: &str = "if.action.pushing";
pub const PUSHING_TO: &str = "if.action.pushing_to";
pub const PULLING: &str = "if.action.pulling";
pub const TURNING: &str = "if.action.turning";
pub const SETTING: &str = "if.action.setting";
pub const RUBBING: &str = "if.action.rubbing";
pub const SQUEEZING: &str = "if.action.squeezing";
pub const BURNING: &str = "if.action.burning";
pub const CUTTING: &str = "if.action.cutting";
pub const TYING: &str = "if.action.tying";
pub const SWINGING: &str = "if.action.swinging";
pub const WAVING: &str = "if.action.waving";
pub const WAVING_HANDS: &str = "if.action.waving_hands";
pub const ATTACKING: &str = "if.action.attacking";

// Wearables and consumables
pub const WEARING: &str = "if.action.wearing";
pub const TAKING_OFF: &str = "if.action.taking_off";
pub const EATING: &str = "if.action.eating";
pub const DRINKING: &str = "if.action.drinking";

// Social
pub const GIVING: &str = "if.action.giving";
pub const SHOWING: &str = "if.action.showing";
pub const TALKING: &str = "if.action.talking";
pub const ASKING: &str = "if.action.asking";
pub const ASKING_FOR: &str = "if.action.asking_for";
pub const TELLING: &str = "if.action.telling";
pub const ANSWERING: &str = "if.action.answering";
pub const KISSING: &str = "if.action.kissing";
pub const WAKING: &str = "if.action.waking";
pub const BUYING: &str = "if.action.buying";

// Simple actions
pub const WAITING: &str = "if.action.waiting";
pub const SLEEPING: &str = "if.action.sleeping";
pub const WAKING_UP: &str = "if.action.waking_up";
pub const THINKING: &str = "if.action.thinking";
pub const JUMPING: &str = "if.action.jumping";
pub const INVENTORY: &str = "if.action.inventory";
pub const SAYING_YES: &str = "if.action.saying_yes";
pub const SAYING_NO: &str = "if.action.saying_no";
pub const SAYING_SORRY: &str = "if.action.saying_sorry";

// Meta
pub const SAVING: &str = "if.action.saving";
pub const RESTORING: &str = "if.action.restoring";
pub const RESTARTING: &str = "if.action.restarting";
pub const QUITTING: &str = "if.action.quitting";
pub const SCORING: &str = "if.action.scoring";
pub const VERSION: &str = "if.action.version";
pub const TRANSCRIPT_ON: &str = "if.action.transcript_on";
pub const TRANSCRIPT_OFF: &str = "if.action.transcript_off";
pub const BRIEF: &str = "if.action.brief";
pub const VERBOSE: &str = "if.action.verbose";
pub const SUPERBRIEF: &str = "if.action.superbrief";
pub const PRONOUNS: &str = "if.action.pronouns";
pub const HELP: &str = "if.action.help";
pub const ABOUT: &str = "if.action.about";
