use crate::{
    group, list, op, types, Constructs, Expressions, Messages, Statements, TypeKind, Vocabulary,
};

pub(crate) fn table() -> Vocabulary {
    Vocabulary {
        name: "français".to_string(),
        comment_marker: "#".to_string(),
        constructs: Constructs {
            function_def: list(&[
                "crée une fonction nommée {name}{params}",
                "crée une fonction appelée {name}{params}",
                "créer une fonction nommée {name}{params}",
                "créer une fonction appelée {name}{params}",
                "définis une fonction nommée {name}{params}",
                "définis une fonction appelée {name}{params}",
                "j'ai une fonction nommée {name}{params}",
                "j'ai une fonction appelée {name}{params}",
            ]),
            param_intro: list(&["qui prend", "avec les paramètres", "avec le paramètre", "prenant"]),
            fillers: list(&["un", "une", "le", "la", "les", "des", "l'"]),
            arity_nouns: list(&[
                "nombre",
                "nombres",
                "paramètre",
                "paramètres",
                "argument",
                "arguments",
                "valeur",
                "valeurs",
            ]),
            cardinals: list(&[
                "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix",
            ]),
            default_param: "n".to_string(),
            if_header: list(&["si {expr}"]),
            connectors: list(&["alors"]),
            else_marker: list(&["sinon"]),
            while_header: list(&["tant que {expr}"]),
            for_each: list(&["pour chaque {var} dans {source}", "pour {var} dans {source}"]),
            range: list(&[
                "la plage de {start} à {end}",
                "la plage {start} à {end}",
                "plage {start} à {end}",
            ]),
            for_times: list(&["pour {count} fois"]),
            repeat: list(&["répète {count} fois", "répéter {count} fois"]),
            do_header: list(&["fais", "faire"]),
        },
        statements: Statements {
            declare: list(&[
                "j'ai un {type} appelé {name}",
                "j'ai une {type} appelée {name}",
                "j'ai un {type} nommé {name}",
                "j'ai une {type} nommée {name}",
                "créer un {type} appelé {name}",
                "créer une {type} appelée {name}",
                "crée un {type} appelé {name}",
                "crée une {type} appelée {name}",
            ]),
            assign: list(&[
                "mets {name} à {expr}",
                "définis {name} à {expr}",
                "assigne {expr} à {name}",
            ]),
            input: list(&[
                "demande à l'utilisateur{_}pour {name}",
                "demande à l'utilisateur{_}la valeur de {name}",
            ]),
            import: list(&[
                "importe le module {name}",
                "importe module {name}",
                "importe {name}",
            ]),
            return_: list(&["je retourne {expr}", "retourne {expr}", "je retourne", "retourne"]),
            break_: list(&["arrête", "stop"]),
            continue_: list(&["continue", "passe"]),
            list_add: list(&["ajoute {expr} à {name}"]),
            list_remove: list(&["enlève {expr} de {name}", "retire {expr} de {name}"]),
            display: list(&[
                "affiche le résultat de {expr}",
                "affiche {expr}",
                "montre {expr}",
                "imprime {expr}",
            ]),
            screen_suffix: list(&["sur l'écran", "à l'écran"]),
            newline_suffix: list(&["ligne"]),
            no_newline_suffix: list(&["continue"]),
            increment: list(&["augmente {name} de {expr}"]),
            decrement: list(&["diminue {name} de {expr}"]),
            call: list(&["appelle {name} avec {args}", "appelle {name}"]),
            conjunction: list(&["et"]),
            line_break: list(&["ligne", "nouvelle ligne"]),
        },
        expressions: Expressions {
            operators: vec![
                op(">=", &["est supérieur ou égal à"]),
                op("<=", &["est inférieur ou égal à"]),
                op("!=", &["n'est pas égal à"]),
                op(">", &["est supérieur à"]),
                op("<", &["est inférieur à"]),
                op("==", &["est égal à", "égale", "égal"]),
                op("*", &["multiplié par", "fois"]),
                op("//", &["division entière par"]),
                op("/", &["divisé par"]),
                op("%", &["modulo", "mod"]),
                op("**", &["à la puissance", "élevé à"]),
                op("+", &["plus"]),
                op("-", &["moins"]),
                op("and", &["et"]),
                op("or", &["ou"]),
                op("not", &["pas"]),
            ],
            true_words: list(&["vrai", "true"]),
            false_words: list(&["faux", "false"]),
            truthy_words: list(&["vrai", "oui", "true", "yes", "1"]),
            builtins: vec![
                group("length", &["longueur", "taille", "len"]),
                group("max", &["maximum", "max"]),
                group("min", &["minimum", "min"]),
                group("sum", &["somme", "sum"]),
                group("average", &["moyenne"]),
                group("random", &["aleatoire", "aléatoire"]),
                group("random_int", &["entier_aleatoire", "entier_aléatoire"]),
                group("sqrt", &["racine_carree", "racine_carrée", "sqrt"]),
                group("power", &["puissance", "pow"]),
                group("abs", &["valeur_absolue", "abs"]),
                group("round", &["arrondir", "round"]),
                group("uppercase", &["majuscule"]),
                group("lowercase", &["minuscule"]),
                group("contains", &["contient"]),
                group("replace", &["remplace"]),
                group("split", &["diviser"]),
                group("join", &["joindre"]),
                group("sort", &["trier"]),
                group("reverse", &["inverser"]),
                group("range", &["plage"]),
            ],
            modules: vec![
                group("math", &["math", "maths", "mathématiques"]),
                group("random", &["random", "aléatoire", "aleatoire", "hasard"]),
            ],
            types: vec![
                types(TypeKind::Number, &["nombre", "entier", "int", "réel"]),
                types(TypeKind::Text, &["chaîne", "chaine", "str", "texte", "mot"]),
                types(TypeKind::Boolean, &["booléen", "booleen", "bool"]),
                types(TypeKind::List, &["liste", "array", "tableau"]),
                types(TypeKind::Map, &["dictionnaire", "dict"]),
            ],
        },
        messages: Messages {
            input_prompt: "Entrez une valeur pour {name} : ".to_string(),
            import_failed: "Impossible d'importer le module {name}".to_string(),
        },
    }
}
