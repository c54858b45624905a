//! Keyword lists shared between built-in languages
//!
//! Lists are comma separated and build on each other the way the
//! languages do: C extends the flow-control words, C++/Java/C#/JS all
//! extend a common C-family core, and the default code lexer knows the
//! union of everything.

const FLOW_CONTROL: &str = "break,continue,do,else,for,if,return,while";

const C_EXTRA: &str = "auto,case,char,const,default,double,enum,extern,float,goto,inline,int,long,\
register,short,signed,sizeof,static,struct,switch,typedef,union,unsigned,void,volatile";

const COMMON_EXTRA: &str = "catch,class,delete,false,import,new,operator,private,protected,public,\
this,throw,true,try,typeof";

const CPP_EXTRA: &str = "alignof,align_union,asm,axiom,bool,concept,concept_map,const_cast,constexpr,\
decltype,delegate,dynamic_cast,explicit,export,friend,generic,late_check,mutable,namespace,nullptr,\
property,reinterpret_cast,static_assert,static_cast,template,typeid,typename,using,virtual,where";

const JAVA_EXTRA: &str = "abstract,assert,boolean,byte,extends,finally,final,implements,import,\
instanceof,interface,null,native,package,strictfp,super,synchronized,throws,transient";

const CSHARP_EXTRA: &str = "abstract,as,base,bool,by,byte,checked,decimal,delegate,descending,dynamic,\
event,finally,fixed,foreach,from,group,implicit,in,interface,internal,into,is,let,lock,null,object,\
out,override,orderby,params,partial,readonly,ref,sbyte,sealed,stackalloc,string,select,uint,ulong,\
unchecked,unsafe,ushort,var,virtual,where";

const JSCRIPT_EXTRA: &str = "abstract,async,await,constructor,debugger,enum,eval,export,function,get,\
implements,instanceof,interface,let,null,set,undefined,var,with,yield,Infinity,NaN";

const PYTHON_EXTRA: &str = "and,as,assert,class,def,del,elif,except,exec,finally,from,global,import,\
in,is,lambda,nonlocal,not,or,pass,print,raise,try,with,yield,False,True,None";

const RUBY_EXTRA: &str = "alias,and,begin,case,class,def,defined,elsif,end,ensure,false,in,module,\
next,nil,not,or,redo,rescue,retry,self,super,then,true,undef,unless,until,when,yield,BEGIN,END";

const SH_EXTRA: &str = "case,done,elif,esac,eval,fi,function,in,local,set,then,until";

const RUST_EXTRA: &str = "as,assert,const,copy,drop,enum,extern,fail,false,fn,impl,let,log,loop,\
match,mod,move,mut,priv,pub,pure,ref,self,static,struct,true,trait,type,unsafe,use";

/// Perl keywords
pub const PERL: &str = "caller,delete,die,do,dump,elsif,eval,exit,foreach,for,goto,if,import,last,\
local,my,next,no,our,print,package,redo,require,sub,undef,unless,until,use,wantarray,while,BEGIN,END";

/// CoffeeScript keywords
pub const COFFEE: &str = "all,and,by,catch,class,else,extends,false,finally,for,if,in,is,isnt,loop,\
new,no,not,null,of,off,on,or,return,super,then,throw,true,try,unless,until,when,while,yes";

/// Keywords of JSON documents
pub const JSON: &str = "null,true,false";

/// Built-in type names for C and C++
pub const C_TYPES: &str = r"(?:DIR|FILE|array|vector|(?:de|priority_)?queue|(?:forward_)?list|stack|(?:const_)?(?:reverse_)?iterator|(?:unordered_)?(?:multi)?(?:set|map)|bitset|u?(?:int|float)\d*)\b";

fn join(parts: &[&str]) -> String {
    parts.join(",")
}

pub fn c() -> String {
    join(&[FLOW_CONTROL, C_EXTRA])
}

fn common() -> String {
    join(&[&c(), COMMON_EXTRA])
}

pub fn cpp() -> String {
    join(&[&common(), CPP_EXTRA])
}

pub fn java() -> String {
    join(&[&common(), JAVA_EXTRA])
}

pub fn csharp() -> String {
    join(&[&common(), CSHARP_EXTRA])
}

pub fn javascript() -> String {
    join(&[&common(), JSCRIPT_EXTRA])
}

pub fn python() -> String {
    join(&[FLOW_CONTROL, PYTHON_EXTRA])
}

pub fn ruby() -> String {
    join(&[FLOW_CONTROL, RUBY_EXTRA])
}

pub fn shell() -> String {
    join(&[FLOW_CONTROL, SH_EXTRA])
}

pub fn rust() -> String {
    join(&[FLOW_CONTROL, RUST_EXTRA])
}

/// Union of every language's keywords, for text of unknown language
pub fn all() -> String {
    join(&[&cpp(), &csharp(), &java(), &javascript(), PERL, &python(), &ruby(), &shell()])
}
