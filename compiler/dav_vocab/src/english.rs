use crate::{
    group, list, op, types, Constructs, Expressions, Messages, Statements, TypeKind, Vocabulary,
};

pub(crate) fn table() -> Vocabulary {
    Vocabulary {
        name: "english".to_string(),
        comment_marker: "#".to_string(),
        constructs: Constructs {
            function_def: list(&[
                "create a function named {name}{params}",
                "create a function called {name}{params}",
                "define a function named {name}{params}",
                "define a function called {name}{params}",
                "i have a function named {name}{params}",
                "i have a function called {name}{params}",
            ]),
            param_intro: list(&["that takes", "with parameters", "with parameter", "taking"]),
            fillers: list(&["a", "an", "the", "some"]),
            arity_nouns: list(&[
                "number",
                "numbers",
                "parameter",
                "parameters",
                "argument",
                "arguments",
                "value",
                "values",
            ]),
            cardinals: list(&[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            ]),
            default_param: "n".to_string(),
            if_header: list(&["if {expr}"]),
            connectors: list(&["then"]),
            else_marker: list(&["otherwise", "else"]),
            while_header: list(&["while {expr}"]),
            for_each: list(&["for each {var} in {source}", "for {var} in {source}"]),
            range: list(&["range {start} to {end}", "range from {start} to {end}"]),
            for_times: list(&["for {count} times"]),
            repeat: list(&["repeat {count} times"]),
            do_header: list(&["do"]),
        },
        statements: Statements {
            declare: list(&[
                "i have a {type} called {name}",
                "i have an {type} called {name}",
                "i have a {type} named {name}",
                "i have an {type} named {name}",
                "create a {type} called {name}",
                "create an {type} called {name}",
                "create a {type} named {name}",
                "create an {type} named {name}",
            ]),
            assign: list(&[
                "set {name} to {expr}",
                "put {expr} in {name}",
                "assign {expr} to {name}",
            ]),
            input: list(&[
                "ask the user{_}for a value for {name}",
                "ask the user{_}for {name}",
            ]),
            import: list(&[
                "import the module {name}",
                "import module {name}",
                "import the {name} module",
                "import the {name}",
                "import {name}",
            ]),
            return_: list(&["i will return {expr}", "return {expr}", "i will return", "return"]),
            break_: list(&["break", "stop the loop"]),
            continue_: list(&["continue", "skip to the next one"]),
            list_add: list(&["add {expr} to {name}"]),
            list_remove: list(&["remove {expr} from {name}"]),
            display: list(&[
                "show the result of {expr}",
                "show {expr}",
                "display {expr}",
                "print {expr}",
            ]),
            screen_suffix: list(&["on the screen", "on screen"]),
            newline_suffix: list(&["line"]),
            no_newline_suffix: list(&["continue"]),
            increment: list(&["increase {name} by {expr}", "increment {name} by {expr}"]),
            decrement: list(&["decrease {name} by {expr}", "decrement {name} by {expr}"]),
            call: list(&["call {name} with {args}", "call {name}"]),
            conjunction: list(&["and"]),
            line_break: list(&["line", "new line"]),
        },
        expressions: Expressions {
            operators: vec![
                op(">=", &["is greater than or equal to"]),
                op("<=", &["is less than or equal to"]),
                op("!=", &["is not equal to"]),
                op(">", &["is greater than"]),
                op("<", &["is less than"]),
                op("==", &["is equal to", "equals", "equal"]),
                op("*", &["multiplied by", "times"]),
                op("//", &["integer division by"]),
                op("/", &["divided by"]),
                op("%", &["modulo", "mod"]),
                op("**", &["to the power of", "raised to", "power"]),
                op("+", &["plus"]),
                op("-", &["minus"]),
                op("and", &["and"]),
                op("or", &["or"]),
                op("not", &["not"]),
            ],
            true_words: list(&["true"]),
            false_words: list(&["false"]),
            truthy_words: list(&["true", "yes", "1"]),
            builtins: vec![
                group("length", &["length", "size", "len"]),
                group("max", &["max", "maximum"]),
                group("min", &["min", "minimum"]),
                group("sum", &["sum"]),
                group("average", &["average", "mean"]),
                group("random", &["random"]),
                group("random_int", &["random_int", "randint"]),
                group("sqrt", &["sqrt", "square_root"]),
                group("power", &["power", "pow"]),
                group("abs", &["abs", "absolute"]),
                group("round", &["round"]),
                group("uppercase", &["uppercase", "upper"]),
                group("lowercase", &["lowercase", "lower"]),
                group("contains", &["contains"]),
                group("replace", &["replace"]),
                group("split", &["split"]),
                group("join", &["join"]),
                group("sort", &["sort", "sorted"]),
                group("reverse", &["reverse", "reversed"]),
                group("range", &["range"]),
            ],
            modules: vec![
                group("math", &["math", "maths"]),
                group("random", &["random"]),
            ],
            types: vec![
                types(TypeKind::Number, &["number", "integer", "int", "num", "float"]),
                types(TypeKind::Text, &["string", "text", "word", "str"]),
                types(TypeKind::Boolean, &["boolean", "bool"]),
                types(TypeKind::List, &["list", "array"]),
                types(TypeKind::Map, &["dictionary", "dict", "map"]),
            ],
        },
        messages: Messages {
            input_prompt: "Enter a value for {name}: ".to_string(),
            import_failed: "Unable to import module {name}".to_string(),
        },
    }
}
