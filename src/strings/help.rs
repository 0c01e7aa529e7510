//! # Help Text
//!
//! Detailed help message describing every keyword.
//! Displayed to the user via the `help` keyword.

pub const MAIN: &str = concat!(
    "Switchboard receives requests and responds to them. The requests must ",
    "strictly follow the syntax shown below.\n",
    "Here are all the keywords, in 'keyword': explanation format\n\n",
    "'weather': Get the real-time weather information\n\n",
    "'note add [your note]': Save a note. Notes have their own indices, ",
    "the first one is 0 and they increase as more notes are saved\n\n",
    "'note show [index]': View a note by its index, starting from 0\n\n",
    "'note show all': View all the notes you've saved, in format index: [your note]. ",
    "Responds 'No notes found' if there is no note saved\n\n",
    "'note del [index]': Delete a note by its index\n\n",
    "'note del all': Delete all the notes you have saved\n\n",
    "'note update [index] [your note]': Replace the note saved at the given index\n\n",
    "'stock track [stock symbol]': Get the real-time stock information by its symbol. ",
    "If the stock market is closed today, responds 'Stock market closed, no data given.'\n\n",
    "'stock history [date] [stock symbol]': Get the stock data of a specific date. ",
    "The date must be in format 'yyyy-mm-dd' and at most about four months ago\n\n",
    "'translate [lang code] [sentence]': Translate the sentence to the given language. ",
    "For [lang code], check out https://sites.google.com/site/tomihasa/google-language-codes"
);
